use std::io::{self, Write};

/// Prints a prompt and reads one trimmed line from standard input.
pub fn prompt(label: &str) -> String {
    print!("{label}");
    io::stdout().flush().expect("Failed to flush stdout");

    let mut line = String::new();
    io::stdin().read_line(&mut line).expect("Failed to read line");
    line.trim().to_owned()
}

/// Asks a yes/no question. Only an affirmative "yes" (any casing) counts;
/// every other response declines.
pub fn confirm(question: &str) -> bool {
    prompt(question).eq_ignore_ascii_case("yes")
}

/// Parses a positive whole-number quantity. Zero, negative numbers, and
/// anything non-numeric are rejected.
pub fn parse_quantity(input: &str) -> Option<u64> {
    match input.parse::<u64>() {
        Ok(quantity) if quantity > 0 => Some(quantity),
        _ => None,
    }
}

/// Parses a positive finite price.
pub fn parse_price(input: &str) -> Option<f64> {
    match input.parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Some(price),
        _ => None,
    }
}
