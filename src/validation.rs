use crate::error::{Result, SpecCheckError};
use crate::models::SpecRequest;

/// Presence validation only: all four fields must be non-empty after trim.
/// The dispatched values stay untrimmed; no semantic validation of hardware
/// names or RAM sizes is performed anywhere.
pub fn validate_request(request: &SpecRequest) -> Result<()> {
    let fields = [
        ("game", &request.game),
        ("gpu", &request.gpu),
        ("cpu", &request.cpu),
        ("ram", &request.ram),
    ];
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(SpecCheckError::Validation(name.to_string()));
        }
    }
    Ok(())
}
