/// GL error codes and their symbolic names.
pub const GL_ERROR_NAMES: &[(u32, &str)] = &[
    (glow::INVALID_ENUM, "INVALID_ENUM"),
    (glow::INVALID_VALUE, "INVALID_VALUE"),
    (glow::INVALID_OPERATION, "INVALID_OPERATION"),
    (glow::STACK_OVERFLOW, "STACK_OVERFLOW"),
    (glow::STACK_UNDERFLOW, "STACK_UNDERFLOW"),
    (glow::OUT_OF_MEMORY, "OUT_OF_MEMORY"),
    (glow::INVALID_FRAMEBUFFER_OPERATION, "INVALID_FRAMEBUFFER_OPERATION"),
];

/// Returns the symbolic name of a GL error code, or `"UNKNOWN"`.
pub fn gl_error_name(code: u32) -> &'static str {
    GL_ERROR_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or("UNKNOWN", |(_, name)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_names() {
        assert_eq!(gl_error_name(0x0500), "INVALID_ENUM");
        assert_eq!(gl_error_name(0x0505), "OUT_OF_MEMORY");
        assert_eq!(gl_error_name(0x0506), "INVALID_FRAMEBUFFER_OPERATION");
    }

    #[test]
    fn unknown_code_falls_back() {
        assert_eq!(gl_error_name(0xBEEF), "UNKNOWN");
    }
}
