//! Bearer token encoding, decoding, and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::{JwtDecoder, TokenError};
pub use encoder::JwtEncoder;

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use filedesk_core::config::auth::AuthConfig;
    use filedesk_entity::account::Role;

    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let cfg = config("round-trip-secret");
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);
        let rid = Uuid::new_v4();

        let token = encoder.issue("42", Role::Admin, Some(rid)).unwrap();
        let claims = decoder.verify(&token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.rid, Some(rid));
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn round_trip_holds_for_short_ttls() {
        for minutes in [1, 5, 60, 24 * 60] {
            let cfg = AuthConfig {
                token_ttl_minutes: minutes,
                ..config("ttl-secret")
            };
            let token = JwtEncoder::new(&cfg).issue("7", Role::User, None).unwrap();
            let claims = JwtDecoder::new(&cfg).verify(&token).unwrap();
            assert_eq!(claims.sub, "7");
            assert_eq!(claims.exp - claims.iat, minutes as i64 * 60);
        }
    }

    #[test]
    fn expired_token_is_rejected() {
        let cfg = config("expiry-secret");
        let encoder = JwtEncoder::new(&cfg);
        let issued = Utc::now() - Duration::hours(2);

        let token = encoder.issue_at("1", Role::User, None, issued).unwrap();
        assert_eq!(
            JwtDecoder::new(&cfg).verify(&token).unwrap_err(),
            TokenError::Expired
        );
    }

    #[test]
    fn foreign_secret_is_bad_signature() {
        let token = JwtEncoder::new(&config("secret-a"))
            .issue("1", Role::Admin, None)
            .unwrap();
        assert_eq!(
            JwtDecoder::new(&config("secret-b")).verify(&token).unwrap_err(),
            TokenError::BadSignature
        );
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let cfg = config("tamper-secret");
        let token = JwtEncoder::new(&cfg).issue("5", Role::User, None).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged_claims = JwtEncoder::new(&cfg).issue("5", Role::Admin, None).unwrap();
        let forged_payload = forged_claims.split('.').nth(1).unwrap();
        let spliced = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert_eq!(
            JwtDecoder::new(&cfg).verify(&spliced).unwrap_err(),
            TokenError::BadSignature
        );
    }

    #[test]
    fn garbage_is_malformed() {
        let decoder = JwtDecoder::new(&config("any"));
        assert_eq!(decoder.verify("not-a-token").unwrap_err(), TokenError::Malformed);
        assert_eq!(decoder.verify("").unwrap_err(), TokenError::Malformed);
    }
}
