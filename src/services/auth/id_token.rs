use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::{error::Error as StdError, fmt};

// ID token の検証 + claim チェックで返るエラー
#[derive(Debug)]
pub enum IdTokenError {
    Jwt(jsonwebtoken::errors::Error),
    MissingOrInvalidAud,
    EmptyClaim(&'static str),
}

impl fmt::Display for IdTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::MissingOrInvalidAud => write!(f, "missing or invalid 'aud' claim"),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
        }
    }
}

impl StdError for IdTokenError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for IdTokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

fn aud_is_present_and_valid(aud: &serde_json::Value) -> bool {
    match aud {
        // 通常ケース: aud は単一の文字列
        serde_json::Value::String(s) => !s.trim().is_empty(),
        // RFC 7519 では文字列の配列も許される
        serde_json::Value::Array(arr) => arr.iter().any(|v| match v {
            serde_json::Value::String(s) => !s.trim().is_empty(),
            _ => false,
        }),
        // claim 自体が無い場合は #[serde(default)] で Null になる
        _ => false,
    }
}

/// ID token (JWT) claims.
///
/// `aud` は文字列でも配列でもよいので `Value` のまま受けて、
/// 照合は `Validation::set_audience` に任せる。
#[derive(Debug, Clone, Deserialize)]
pub struct IdTokenClaims {
    pub iss: String,
    #[serde(default)]
    pub aud: serde_json::Value,

    pub sub: String,
    pub exp: u64,

    #[serde(default)]
    pub nbf: Option<u64>,
    #[serde(default)]
    pub iat: Option<u64>,
}

/// AuthService が返す「検証済み・アプリ側で使う型」
///
/// - `uid` は identity provider が採番した subject identifier (不透明な文字列)
/// - `iss/aud/exp` の整合性は `verify_strict` の中（jsonwebtoken + 追加チェック）で保証される前提
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    pub uid: String,
}

/// HS256 の ID-token verifier。
///
/// shared secret は Debug に出さない。
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &str, issuer: &str, audience: &str, leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = leeway_seconds;

        Self {
            decoding_key,
            validation,
        }
    }

    // Verify and decode a JWT ID token.
    pub fn verify(&self, token: &str) -> Result<IdTokenClaims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<IdTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify + strict claim validation.
    ///
    /// 署名と `exp`、それに set 済みの `iss`/`aud` の照合までは
    /// `jsonwebtoken::Validation` がやってくれる。ここではその上で
    /// 必須 claim (`iss`, `aud`, `sub`, `exp`) が空でないことを確認する。
    pub fn verify_strict(&self, token: &str) -> Result<IdTokenClaims, IdTokenError> {
        let claims = self.verify(token)?;

        // `exp` は u64 なので存在自体は serde が保証する。0 だけ弾いておく。
        if claims.iss.trim().is_empty() {
            return Err(IdTokenError::EmptyClaim("iss"));
        }
        if claims.sub.trim().is_empty() {
            return Err(IdTokenError::EmptyClaim("sub"));
        }
        if claims.exp == 0 {
            return Err(IdTokenError::EmptyClaim("exp"));
        }
        if !aud_is_present_and_valid(&claims.aud) {
            return Err(IdTokenError::MissingOrInvalidAud);
        }

        Ok(claims)
    }

    /// 検証済み claims をアプリ側で使う型に落とす。middleware はこれを呼ぶ。
    pub fn verify_identity(&self, token: &str) -> Result<VerifiedIdentity, IdTokenError> {
        let claims = self.verify_strict(token)?;

        Ok(VerifiedIdentity { uid: claims.sub })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header};
    use serde::Serialize;

    const SECRET: &str = "unit-test-secret";
    const ISSUER: &str = "https://issuer.test";
    const AUDIENCE: &str = "people-api";

    #[derive(Serialize)]
    struct TestClaims<'a> {
        iss: &'a str,
        aud: &'a str,
        sub: &'a str,
        exp: u64,
    }

    fn service() -> AuthService {
        AuthService::new(SECRET, ISSUER, AUDIENCE, 0)
    }

    fn sign(claims: &TestClaims<'_>, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("sign test token")
    }

    fn future_exp() -> u64 {
        (chrono::Utc::now().timestamp() + 600) as u64
    }

    #[test]
    fn accepts_a_valid_token_and_returns_the_subject() {
        let token = sign(
            &TestClaims {
                iss: ISSUER,
                aud: AUDIENCE,
                sub: "provider-uid-1",
                exp: future_exp(),
            },
            SECRET,
        );

        let identity = service().verify_identity(&token).expect("valid token");
        assert_eq!(identity.uid, "provider-uid-1");
    }

    #[test]
    fn rejects_a_token_signed_with_another_secret() {
        let token = sign(
            &TestClaims {
                iss: ISSUER,
                aud: AUDIENCE,
                sub: "provider-uid-1",
                exp: future_exp(),
            },
            "some-other-secret",
        );

        assert!(service().verify_identity(&token).is_err());
    }

    #[test]
    fn rejects_a_token_from_another_issuer() {
        let token = sign(
            &TestClaims {
                iss: "https://other-issuer.test",
                aud: AUDIENCE,
                sub: "provider-uid-1",
                exp: future_exp(),
            },
            SECRET,
        );

        assert!(service().verify_identity(&token).is_err());
    }

    #[test]
    fn rejects_an_expired_token() {
        let token = sign(
            &TestClaims {
                iss: ISSUER,
                aud: AUDIENCE,
                sub: "provider-uid-1",
                exp: (chrono::Utc::now().timestamp() - 3600) as u64,
            },
            SECRET,
        );

        assert!(service().verify_identity(&token).is_err());
    }

    #[test]
    fn rejects_an_empty_subject() {
        let token = sign(
            &TestClaims {
                iss: ISSUER,
                aud: AUDIENCE,
                sub: "",
                exp: future_exp(),
            },
            SECRET,
        );

        assert!(matches!(
            service().verify_identity(&token),
            Err(IdTokenError::EmptyClaim("sub"))
        ));
    }

    #[test]
    fn rejects_garbage_input() {
        assert!(service().verify_identity("not-a-jwt").is_err());
    }
}
