//! Lookup providers and the mapping from their HTTP responses into a
//! normalized outcome.
//!
//! ViaCEP signals a missing CEP with an `erro` field in an HTTP 200 body;
//! BrasilAPI signals it with a plain 404. Both are mapped to the same
//! `Failure::NotFound`.

use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

use crate::cep::CepKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Provider {
    #[default]
    Viacep,
    Brasilapi,
    /// BrasilAPI's v2 endpoint (same response shape as v1).
    BrasilapiV2,
}

impl Provider {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Viacep => "https://viacep.com.br",
            Provider::Brasilapi | Provider::BrasilapiV2 => "https://brasilapi.com.br",
        }
    }

    pub fn lookup_path(&self, cep: &CepKey) -> String {
        match self {
            Provider::Viacep => format!("/ws/{}/json/", cep),
            Provider::Brasilapi => format!("/api/cep/v1/{}", cep),
            Provider::BrasilapiV2 => format!("/api/cep/v2/{}", cep),
        }
    }

    /// Map a completed HTTP exchange onto a lookup outcome.
    pub fn interpret(&self, status: u16, body: &str) -> Lookup {
        match self {
            Provider::Viacep => interpret_viacep(status, body),
            Provider::Brasilapi | Provider::BrasilapiV2 => interpret_brasilapi(status, body),
        }
    }
}

/// Address fields shared by both providers; absent fields stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// Outcome of a single lookup. Failures are data, not errors: the batch
/// driver records them in the row's Status column and keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Address),
    Failed(Failure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    InvalidFormat,
    NotFound,
    Http(u16),
    Transport(String),
    Unexpected(String),
}

// Status column values, kept verbatim from the spreadsheets this tool
// replaces; downstream consumers filter on these strings.
impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::InvalidFormat => write!(f, "Formato de CEP inválido"),
            Failure::NotFound => write!(f, "CEP não encontrado"),
            Failure::Http(code) => write!(f, "Erro na requisição (Código {})", code),
            Failure::Transport(cause) => write!(f, "Erro de Conexão: {}", cause),
            Failure::Unexpected(cause) => write!(f, "Erro inesperado: {}", cause),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ViaCepBody {
    #[serde(default)]
    erro: Option<serde_json::Value>,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

#[derive(Debug, Deserialize)]
struct BrasilApiBody {
    #[serde(default)]
    street: String,
    #[serde(default)]
    neighborhood: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
}

fn interpret_viacep(status: u16, body: &str) -> Lookup {
    if !(200..300).contains(&status) {
        return Lookup::Failed(Failure::Http(status));
    }

    match serde_json::from_str::<ViaCepBody>(body) {
        Ok(parsed) => {
            // `erro` has been observed both as `true` and as `"true"`.
            let not_found = match &parsed.erro {
                Some(serde_json::Value::Bool(b)) => *b,
                Some(serde_json::Value::String(s)) => s == "true",
                Some(serde_json::Value::Null) | None => false,
                Some(_) => true,
            };
            if not_found {
                Lookup::Failed(Failure::NotFound)
            } else {
                Lookup::Found(Address {
                    street: parsed.logradouro,
                    neighborhood: parsed.bairro,
                    city: parsed.localidade,
                    state: parsed.uf,
                })
            }
        }
        Err(e) => Lookup::Failed(Failure::Unexpected(e.to_string())),
    }
}

fn interpret_brasilapi(status: u16, body: &str) -> Lookup {
    if status == 404 {
        return Lookup::Failed(Failure::NotFound);
    }
    if !(200..300).contains(&status) {
        return Lookup::Failed(Failure::Http(status));
    }

    match serde_json::from_str::<BrasilApiBody>(body) {
        Ok(parsed) => Lookup::Found(Address {
            street: parsed.street,
            neighborhood: parsed.neighborhood,
            city: parsed.city,
            state: parsed.state,
        }),
        Err(e) => Lookup::Failed(Failure::Unexpected(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cep::normalize;

    #[test]
    fn test_lookup_paths() {
        let key = normalize("01001-000").unwrap();
        assert_eq!(Provider::Viacep.lookup_path(&key), "/ws/01001000/json/");
        assert_eq!(
            Provider::Brasilapi.lookup_path(&key),
            "/api/cep/v1/01001000"
        );
        assert_eq!(
            Provider::BrasilapiV2.lookup_path(&key),
            "/api/cep/v2/01001000"
        );
    }

    #[test]
    fn test_viacep_success_mapping() {
        let body = r#"{"cep":"01001-000","logradouro":"Praça da Sé","bairro":"Sé","localidade":"São Paulo","uf":"SP"}"#;
        match Provider::Viacep.interpret(200, body) {
            Lookup::Found(addr) => {
                assert_eq!(addr.street, "Praça da Sé");
                assert_eq!(addr.neighborhood, "Sé");
                assert_eq!(addr.city, "São Paulo");
                assert_eq!(addr.state, "SP");
            }
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[test]
    fn test_viacep_erro_marker_is_not_found() {
        assert_eq!(
            Provider::Viacep.interpret(200, r#"{"erro": true}"#),
            Lookup::Failed(Failure::NotFound)
        );
        assert_eq!(
            Provider::Viacep.interpret(200, r#"{"erro": "true"}"#),
            Lookup::Failed(Failure::NotFound)
        );
    }

    #[test]
    fn test_viacep_missing_fields_still_found() {
        match Provider::Viacep.interpret(200, "{}") {
            Lookup::Found(addr) => assert_eq!(addr, Address::default()),
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[test]
    fn test_viacep_non_2xx_is_http_failure() {
        assert_eq!(
            Provider::Viacep.interpret(500, ""),
            Lookup::Failed(Failure::Http(500))
        );
    }

    #[test]
    fn test_viacep_unparseable_body_is_unexpected() {
        assert!(matches!(
            Provider::Viacep.interpret(200, "not json"),
            Lookup::Failed(Failure::Unexpected(_))
        ));
    }

    #[test]
    fn test_brasilapi_404_is_not_found() {
        assert_eq!(
            Provider::Brasilapi.interpret(404, r#"{"message":"CEP NAO ENCONTRADO"}"#),
            Lookup::Failed(Failure::NotFound)
        );
    }

    #[test]
    fn test_brasilapi_success_mapping() {
        let body = r#"{"cep":"01001000","street":"Praça da Sé","neighborhood":"Sé","city":"São Paulo","state":"SP"}"#;
        match Provider::BrasilapiV2.interpret(200, body) {
            Lookup::Found(addr) => {
                assert_eq!(addr.street, "Praça da Sé");
                assert_eq!(addr.state, "SP");
            }
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_status_text() {
        assert_eq!(Failure::InvalidFormat.to_string(), "Formato de CEP inválido");
        assert_eq!(Failure::NotFound.to_string(), "CEP não encontrado");
        assert_eq!(Failure::Http(503).to_string(), "Erro na requisição (Código 503)");
    }
}
