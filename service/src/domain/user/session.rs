//! [`Session`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, Error, From, FromStr};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::user::{self, Role, Username};

/// Claim set of a [`Token`], describing the `User` session it represents.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Session {
    /// ID of the `User` this [`Session`] belongs to.
    pub user_id: user::Id,

    /// [`Role`] of the `User` this [`Session`] belongs to.
    pub role: Role,

    /// [`Username`] of the `User` this [`Session`] belongs to.
    pub username: Username,

    /// [`DateTime`] when this [`Session`] expires.
    ///
    /// Carried by every issued [`Token`], but not enforced on the client: a
    /// stale [`Session`] is only rejected once the remote service refuses
    /// its [`Token`].
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,
}

impl Session {
    /// Decodes a [`Session`] from the provided [`Token`].
    ///
    /// The [`Token`]'s cryptographic signature is **not** verified here:
    /// verification is the issuing service's responsibility, and the client
    /// only trusts what it received over the authenticated channel. Every
    /// authorization decision derived from the result is a UX concern, never
    /// a security boundary.
    ///
    /// The `exp` claim is required to be present, but its value is not
    /// checked.
    ///
    /// # Errors
    ///
    /// Errors if the [`Token`] is not a well-formed three-segment compact
    /// [JWT], or its payload misses any of the [`Session`] claims.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    pub fn decode(token: &Token) -> Result<Self, DecodeError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;

        jsonwebtoken::decode::<Self>(
            token.as_ref(),
            &DecodingKey::from_secret(&[]),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(Into::into)
    }
}

/// Error of decoding a [`Session`] from a [`Token`].
#[derive(Debug, Display, Error, From)]
#[display("Failed to decode `Session` from a token: {_0}")]
pub struct DecodeError(jsonwebtoken::errors::Error);

/// Access token of a [`Session`].
#[derive(AsRef, Clone, Debug, Display, FromStr)]
#[as_ref(str, String)]
pub struct Token(String);

impl Token {
    /// Creates a new [`Token`] without checking its contents.
    ///
    /// # Safety
    ///
    /// The provided `token` must be a valid [`Token`] representation.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(token: String) -> Self {
        Self(token)
    }
}

/// Decoded, authoritative representation of the current `User` within the
/// running client.
///
/// Only ever constructed from a successfully decoded [`Session`], either
/// right after login or when restoring a persisted [`Token`] on startup.
#[derive(Clone, Debug)]
pub struct Identity {
    /// ID of the `User`.
    pub id: user::Id,

    /// [`Role`] of the `User`.
    pub role: Role,

    /// [`Username`] of the `User`.
    pub username: Username,

    /// Raw [`Token`] this [`Identity`] was decoded from.
    pub token: Token,
}

impl Identity {
    /// Creates a new [`Identity`] from the decoded [`Session`] and the
    /// [`Token`] it was decoded from.
    #[must_use]
    pub fn new(session: Session, token: Token) -> Self {
        let Session {
            user_id,
            role,
            username,
            expires_at: _,
        } = session;

        Self {
            id: user_id,
            role,
            username,
            token,
        }
    }
}

/// [`DateTime`] of a [`Session`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Session, unit::Expiration)>;

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;
    use serde::Serialize;

    use crate::testing;

    use super::{Role, Session, Token};

    #[test]
    fn decodes_claims() {
        for role in [Role::Admin, Role::Manager, Role::Employee] {
            let token = testing::token(42, role, "alice");

            let session = Session::decode(&token).unwrap();

            assert_eq!(session.user_id, 42.into());
            assert_eq!(session.role, role);
            assert_eq!(session.username, "alice".parse().unwrap());
        }
    }

    #[test]
    fn fails_on_malformed_input() {
        for raw in [
            "",
            "garbage",
            "two.segments",
            "f.o.u.r",
            "!!!.###.@@@",
            "bm90IGpzb24.bm90IGpzb24.bm90IGpzb24",
        ] {
            let token = raw.parse::<Token>().unwrap();

            assert!(
                Session::decode(&token).is_err(),
                "`{raw}` unexpectedly decoded",
            );
        }
    }

    #[test]
    fn fails_on_missing_claims() {
        #[derive(Serialize)]
        struct Partial {
            user_id: i64,
            exp: i64,
        }

        let raw = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &Partial {
                user_id: 1,
                exp: DateTime::now().unix_timestamp() + 1800,
            },
            &jsonwebtoken::EncodingKey::from_secret(testing::JWT_SECRET),
        )
        .unwrap();

        assert!(Session::decode(&raw.parse().unwrap()).is_err());
    }

    #[test]
    fn ignores_signature() {
        let session = Session {
            user_id: 7.into(),
            role: Role::Manager,
            username: "bob".parse().unwrap(),
            expires_at: (DateTime::now() + Duration::from_secs(1800)).coerce(),
        };
        let raw = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &session,
            &jsonwebtoken::EncodingKey::from_secret(b"some other secret"),
        )
        .unwrap();

        assert_eq!(
            Session::decode(&raw.parse().unwrap()).unwrap().role,
            Role::Manager,
        );
    }

    #[test]
    fn ignores_expiry() {
        let session = Session {
            user_id: 7.into(),
            role: Role::Employee,
            username: "bob".parse().unwrap(),
            expires_at: (DateTime::now() - Duration::from_secs(1800)).coerce(),
        };
        let raw = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &session,
            &jsonwebtoken::EncodingKey::from_secret(testing::JWT_SECRET),
        )
        .unwrap();

        assert!(Session::decode(&raw.parse().unwrap()).is_ok());
    }
}
