//! Camera id helpers.
//!
//! Camera ids are the camera's IPv4 address as eight lowercase hex digits,
//! e.g. `192.168.113.147` -> `c0a87193`.

use std::net::Ipv4Addr;

use crate::error::{ModelError, ModelResult};

/// Encode a dotted IPv4 address as a hex camera id.
pub fn ipv4_to_hex(ipv4: &str) -> ModelResult<String> {
    let addr: Ipv4Addr = ipv4
        .trim()
        .parse()
        .map_err(|_| ModelError::InvalidIpv4(ipv4.to_string()))?;
    Ok(addr.octets().iter().map(|o| format!("{:02x}", o)).collect())
}

/// Decode a hex camera id back to its IPv4 address.
pub fn hex_to_ipv4(hex: &str) -> ModelResult<Ipv4Addr> {
    if hex.len() != 8 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ModelError::InvalidCameraHex(hex.to_string()));
    }
    let value =
        u32::from_str_radix(hex, 16).map_err(|_| ModelError::InvalidCameraHex(hex.to_string()))?;
    Ok(Ipv4Addr::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_to_hex() {
        assert_eq!(ipv4_to_hex("192.168.113.147").unwrap(), "c0a87193");
        assert_eq!(ipv4_to_hex("10.0.0.1").unwrap(), "0a000001");
    }

    #[test]
    fn test_hex_to_ipv4() {
        assert_eq!(
            hex_to_ipv4("c0a87194").unwrap(),
            Ipv4Addr::new(192, 168, 113, 148)
        );
        assert_eq!(hex_to_ipv4("C0A87193").unwrap().to_string(), "192.168.113.147");
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(ipv4_to_hex("300.1.1.1"), Err(ModelError::InvalidIpv4(_))));
        assert!(matches!(hex_to_ipv4("c0a871"), Err(ModelError::InvalidCameraHex(_))));
        assert!(matches!(hex_to_ipv4("zza87193"), Err(ModelError::InvalidCameraHex(_))));
    }
}
