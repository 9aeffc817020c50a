//! Configuration types.

use secrecy::SecretString;

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encryption {
    /// TLS from the first byte (SMTPS, usually port 465).
    ImplicitTls,
    /// Plain connection upgraded with STARTTLS before authenticating.
    #[default]
    StartTls,
    /// No encryption at all. Credentials travel in clear text.
    None,
}

impl Encryption {
    /// Map the CLI's two boolean switches onto a mode.
    ///
    /// `use_ssl` wins over `no_tls`, matching how the flags were always
    /// interpreted: implicit TLS never attempts STARTTLS anyway.
    pub fn from_flags(no_tls: bool, use_ssl: bool) -> Self {
        if use_ssl {
            Self::ImplicitTls
        } else if no_tls {
            Self::None
        } else {
            Self::StartTls
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ImplicitTls => "implicit-tls",
            Self::StartTls => "starttls",
            Self::None => "none",
        }
    }
}

/// Declared or effective type of the message body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum BodyKind {
    #[default]
    Plain,
    Html,
}

/// SMTP login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Where and how to submit the message.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub host: String,
    pub port: u16,
    pub credentials: Credentials,
    pub encryption: Encryption,
}

impl TransportConfig {
    /// Build a config with the default encryption mode (STARTTLS).
    pub fn new(host: impl Into<String>, port: u16, credentials: Credentials) -> Self {
        Self {
            host: host.into(),
            port,
            credentials,
            encryption: Encryption::default(),
        }
    }

    pub fn with_encryption(mut self, encryption: Encryption) -> Self {
        self.encryption = encryption;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials {
            username: "mailer@example.com".into(),
            password: SecretString::from("hunter2"),
        }
    }

    #[test]
    fn defaults_are_starttls_and_plain() {
        assert_eq!(Encryption::default(), Encryption::StartTls);
        assert_eq!(BodyKind::default(), BodyKind::Plain);
        let config = TransportConfig::new("smtp.example.com", 587, creds());
        assert_eq!(config.encryption, Encryption::StartTls);
    }

    #[test]
    fn flags_map_to_modes() {
        assert_eq!(Encryption::from_flags(false, false), Encryption::StartTls);
        assert_eq!(Encryption::from_flags(true, false), Encryption::None);
        assert_eq!(Encryption::from_flags(false, true), Encryption::ImplicitTls);
        assert_eq!(Encryption::from_flags(true, true), Encryption::ImplicitTls);
    }

    #[test]
    fn debug_does_not_leak_password() {
        let config = TransportConfig::new("smtp.example.com", 587, creds());
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
    }
}
