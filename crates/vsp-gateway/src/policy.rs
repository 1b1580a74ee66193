//! Typed policy flags carried on gateway requests.
//!
//! Each enum maps to the exact wire value the gateway expects. Combinations
//! are not cross-checked here; the gateway rejects invalid ones in its
//! response status.

use std::fmt;
use std::str::FromStr;

use crate::ConfigError;

/// Merchant account used for the transaction. Ignored for PayPal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccountType {
    /// `E`: e-commerce merchant account.
    #[default]
    Ecommerce,
    /// `M`: mail/telephone order account, if present.
    MailOrder,
    /// `C`: continuous authority account, if present.
    ContinuousAuthority,
}

impl AccountType {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountType::Ecommerce => "E",
            AccountType::MailOrder => "M",
            AccountType::ContinuousAuthority => "C",
        }
    }
}

impl FromStr for AccountType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "E" => Ok(AccountType::Ecommerce),
            "M" => Ok(AccountType::MailOrder),
            "C" => Ok(AccountType::ContinuousAuthority),
            _ => Err(ConfigError::InvalidValue {
                name: "account type",
                value: s.to_string(),
            }),
        }
    }
}

/// 3-D Secure handling. Ignored for PayPal and European payment types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Apply3DSecure {
    /// `0`: check if possible and apply the account's rules.
    #[default]
    Apply,
    /// `1`: force checks if possible and apply rules for authorisation.
    Force,
    /// `2`: never check; always authorise.
    None,
    /// `3`: force checks if possible but always obtain an auth code,
    /// irrespective of the rule base.
    ForceAuth,
}

impl Apply3DSecure {
    pub fn code(self) -> u8 {
        match self {
            Apply3DSecure::Apply => 0,
            Apply3DSecure::Force => 1,
            Apply3DSecure::None => 2,
            Apply3DSecure::ForceAuth => 3,
        }
    }
}

impl TryFrom<u8> for Apply3DSecure {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Apply3DSecure::Apply),
            1 => Ok(Apply3DSecure::Force),
            2 => Ok(Apply3DSecure::None),
            3 => Ok(Apply3DSecure::ForceAuth),
            _ => Err(ConfigError::InvalidValue {
                name: "3-D Secure mode",
                value: code.to_string(),
            }),
        }
    }
}

/// AVS/CV2 handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApplyAvsCv2 {
    /// `0`: check if enabled on the account; apply rules if any.
    #[default]
    Apply,
    /// `1`: force checks even if not enabled; apply rules if any.
    Force,
    /// `2`: force no checks even if enabled.
    Disable,
    /// `3`: force checks even if not enabled, but don't apply any rules.
    ForceWithoutRules,
}

impl ApplyAvsCv2 {
    pub fn code(self) -> u8 {
        match self {
            ApplyAvsCv2::Apply => 0,
            ApplyAvsCv2::Force => 1,
            ApplyAvsCv2::Disable => 2,
            ApplyAvsCv2::ForceWithoutRules => 3,
        }
    }
}

impl TryFrom<u8> for ApplyAvsCv2 {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ApplyAvsCv2::Apply),
            1 => Ok(ApplyAvsCv2::Force),
            2 => Ok(ApplyAvsCv2::Disable),
            3 => Ok(ApplyAvsCv2::ForceWithoutRules),
            _ => Err(ConfigError::InvalidValue {
                name: "AVS/CV2 mode",
                value: code.to_string(),
            }),
        }
    }
}

macro_rules! code_from_str {
    ($ty:ty, $name:literal) => {
        impl FromStr for $ty {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let code: u8 = s.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    name: $name,
                    value: s.to_string(),
                })?;
                Self::try_from(code)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.code())
            }
        }
    };
}

code_from_str!(Apply3DSecure, "3-D Secure mode");
code_from_str!(ApplyAvsCv2, "AVS/CV2 mode");

/// Hosted form profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Profile {
    /// Full page forms.
    #[default]
    Normal,
    /// Forms suitable for embedding in an iframe.
    Low,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Normal => "NORMAL",
            Profile::Low => "LOW",
        }
    }

    /// `true` selects the iframe-friendly [`Profile::Low`].
    pub fn for_iframe(iframe: bool) -> Self {
        if iframe {
            Profile::Low
        } else {
            Profile::Normal
        }
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NORMAL" => Ok(Profile::Normal),
            "LOW" => Ok(Profile::Low),
            _ => Err(ConfigError::InvalidValue {
                name: "profile",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire form of the create/store token flags.
pub fn flag_value(flag: bool) -> &'static str {
    if flag {
        "1"
    } else {
        "0"
    }
}
