/// Parse an unsigned decimal integer literal.
pub fn parse_int_constant(text: &str) -> Result<i64, String> {
    text.parse::<i64>()
        .map_err(|_| format!("integer literal `{}` is out of range", text))
}
