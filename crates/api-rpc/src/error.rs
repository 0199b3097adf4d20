//! RPC Error Types
//!
//! Maps bridge rejections and probe failures to JSON-RPC error objects.

use jsonrpsee::types::ErrorObjectOwned;
use serde_json::json;
use termux_bridge_core::port::ProbeError;
use termux_bridge_core::Rejection;

/// RPC Error Codes
pub mod code {
    pub const PROBE_ERROR: i32 = 5002;
    pub const DISPATCH_ERROR: i32 = 5003;
}

/// Convert a dispatch rejection to a JSON-RPC ErrorObject.
///
/// The stable string code travels in `data.code`.
pub fn rejection_to_rpc_error(rejection: Rejection) -> ErrorObjectOwned {
    ErrorObjectOwned::owned(
        code::DISPATCH_ERROR,
        rejection.message,
        Some(json!({ "code": rejection.code })),
    )
}

pub fn probe_to_rpc_error(err: ProbeError) -> ErrorObjectOwned {
    ErrorObjectOwned::owned(code::PROBE_ERROR, err.to_string(), None::<()>)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_mapping() {
        let err = rejection_to_rpc_error(Rejection::dispatch("Host not found: com.termux"));
        assert_eq!(err.code(), code::DISPATCH_ERROR);
        assert_eq!(err.message(), "Host not found: com.termux");

        let data: serde_json::Value = serde_json::from_str(err.data().unwrap().get()).unwrap();
        assert_eq!(data["code"], "DISPATCH_ERROR");
    }
}
