use guidance_core::config::validate_ratio;
use guidance_core::format::OutputFormat;

/// Parse output format from string
pub fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse a compression ratio, rejecting values outside (0, 1]
pub fn parse_ratio(s: &str) -> std::result::Result<f64, String> {
    let ratio: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    validate_ratio(ratio).map_err(|e| e.to_string())?;
    Ok(ratio)
}
