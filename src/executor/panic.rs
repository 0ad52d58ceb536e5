use std::any::Any;

/// Fixed text used when a panic payload carries no printable message.
pub(crate) const GENERIC_PANIC: &str = "unknown panic payload";

/// Best-effort human-readable description of a panic payload. String
/// payloads (the common case for `panic!`) are passed through; anything
/// else gets the generic text.
pub(crate) fn describe_panic(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        GENERIC_PANIC.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    fn payload_of(f: impl FnOnce()) -> Box<dyn Any + Send> {
        catch_unwind(AssertUnwindSafe(f)).unwrap_err()
    }

    #[test]
    fn str_payload() {
        let payload = payload_of(|| panic!("plain message"));
        assert_eq!(describe_panic(payload.as_ref()), "plain message");
    }

    #[test]
    fn formatted_payload() {
        let payload = payload_of(|| panic!("code {}", 42));
        assert_eq!(describe_panic(payload.as_ref()), "code 42");
    }

    #[test]
    fn opaque_payload() {
        let payload = payload_of(|| std::panic::panic_any(17u8));
        assert_eq!(describe_panic(payload.as_ref()), GENERIC_PANIC);
    }
}
