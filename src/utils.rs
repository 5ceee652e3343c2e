use data_encoding::BASE32_NOPAD;

// Decode a base32 secret as shown by authenticator apps: case-insensitive,
// optional trailing padding, spaces and dashes between groups ignored
pub fn decode_base32_key(value: &str) -> Result<Vec<u8>, String> {
    let normalized: String = value
        .trim_end_matches(|c: char| c == '=' || c.is_whitespace())
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if normalized.is_empty() {
        return Err(String::from("the key is empty"));
    }

    BASE32_NOPAD
        .decode(normalized.as_bytes())
        .map_err(|_| String::from("the key is not a valid base32 encoding"))
}
