//! Styled name example
//!
//! Demonstrates color presets, attribute patterns, name collapsing and key
//! truncation.
//!
//! Run with: cargo run --example styled_names

use named_logger::prelude::*;

fn show(provider: &LoggerProvider, title: &str) {
    println!("{}:", title);
    let root = provider.get_logger();
    root.named("RequestHandler")
        .keyed("Session", "page_alwjkdkjapiu90182wq")
        .error("Request failed");
    root.named("AuthService").named("Token Cache").warn("Entry expired");
    root.named("Db").keyed("Conn", 7).error("Pool exhausted");
    println!();
}

fn main() -> Result<()> {
    println!("=== Named Logger - Styled Names Example ===\n");

    let provider = LoggerProvider::new();
    show(&provider, "1. Default muted palette");

    provider.configure_logging(
        LoggingConfig::new().style(StyleConfig::new().color(ColorScheme::Bright)),
    );
    show(&provider, "2. Bright palette");

    provider.configure_logging(LoggingConfig::new().style(
        StyleConfig::new()
            .color(ColorScheme::Grayscale)
            .bold(NamePattern::regex("Service$")?)
            .underline(NamePattern::regex("^#")?),
    ));
    show(&provider, "3. Grayscale with bold services and underlined keys");

    provider.configure_logging(LoggingConfig::new().style(
        StyleConfig::new()
            .replace(NameReplace::Collapse)
            .replace_key(KeyReplace::Truncate),
    ));
    show(&provider, "4. Collapsed names and truncated keys");

    provider.configure_logging(LoggingConfig::new().style(
        StyleConfig::new().color(ColorScheme::custom(|name| {
            if name.starts_with('#') {
                "\u{1b}[38;5;245m".to_string()
            } else {
                "\u{1b}[38;5;39m".to_string()
            }
        })),
    ));
    show(&provider, "5. Custom color function");

    provider.configure_logger(LoggerConfig::Console(ConsoleConfig::from_env()));
    show(&provider, "6. Colors as the terminal environment allows");

    println!("=== Example completed successfully! ===");
    Ok(())
}
