//! Payment logging demo
//!
//! Switches a stdout logger to JSON and logs one record with payment context.
//!
//! Run with: cargo run --example payment

use titanlog::prelude::*;

fn main() {
    let logger = Logger::new(LogLevel::Info, WriterSink::stdout());
    logger.set_formatter(JsonFormatter::new());

    logger
        .with_fields(&fields! {
            "user_id" => 12345,
            "action" => "payment",
            "currency" => "USD",
        })
        .info("Payment processed successfully");
}
