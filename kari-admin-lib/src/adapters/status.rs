//! Closed status taxonomies

use std::fmt;
use std::str::FromStr;

use crate::error::AdapterError;

/// Badge color family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Green,
    Yellow,
    Gray,
    Blue,
    Red,
    Purple,
    Indigo,
    Orange,
}

impl Tone {
    /// Tailwind classes of the badge.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Green => "bg-green-100 text-green-800",
            Self::Yellow => "bg-yellow-100 text-yellow-800",
            Self::Gray => "bg-gray-100 text-gray-800",
            Self::Blue => "bg-blue-100 text-blue-800",
            Self::Red => "bg-red-100 text-red-800",
            Self::Purple => "bg-purple-100 text-purple-800",
            Self::Indigo => "bg-indigo-100 text-indigo-800",
            Self::Orange => "bg-orange-100 text-orange-800",
        }
    }
}

/// A label plus its tone, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

impl Badge {
    pub fn new(label: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: label.into(),
            tone,
        }
    }

    /// Neutral badge showing the raw value, for values outside a taxonomy.
    pub fn fallback(raw: &str) -> Self {
        Self::new(raw, Tone::Gray)
    }

    pub fn css_class(&self) -> &'static str {
        self.tone.css_class()
    }
}

/// A value of a closed taxonomy with a display label and tone.
pub trait Status: FromStr<Err = AdapterError> + Copy {
    /// Name of the taxonomy, used in errors.
    const KIND: &'static str;

    /// Wire value.
    fn key(&self) -> &'static str;

    /// pt-BR label.
    fn label(&self) -> &'static str;

    fn tone(&self) -> Tone;

    fn badge(&self) -> Badge {
        Badge::new(self.label(), self.tone())
    }
}

/// Badge for a raw value, falling back to [`Badge::fallback`] when the value
/// is outside the taxonomy.
pub fn badge_or_fallback<S: Status>(raw: &str) -> Badge {
    match raw.parse::<S>() {
        Ok(status) => status.badge(),
        Err(err) => {
            log::warn!("{}", err);
            Badge::fallback(raw)
        }
    }
}

macro_rules! taxonomy {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $key:literal, $label:literal, $tone:ident;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];
        }

        impl Status for $name {
            const KIND: &'static str = $kind;

            fn key(&self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            fn tone(&self) -> Tone {
                match self {
                    $(Self::$variant => Tone::$tone,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = AdapterError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($key => Ok(Self::$variant),)+
                    other => Err(AdapterError::unknown($kind, other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

taxonomy! {
    /// Campaign lifecycle.
    CampaignStatus, "campaign status" {
        Active => "active", "Ativa", Green;
        Pending => "pending", "Pendente", Yellow;
        Completed => "completed", "Encerrada", Gray;
    }
}

taxonomy! {
    /// Participant standing within a campaign.
    ParticipantStatus, "participant status" {
        Active => "active", "Ativo", Green;
        Inactive => "inactive", "Inativo", Gray;
        Winner => "winner", "Vencedor", Yellow;
    }
}

taxonomy! {
    /// Progress of a declared winner.
    WinnerStatus, "winner status" {
        Pending => "pending", "Pendente", Yellow;
        Announced => "announced", "Anunciado", Blue;
        Claimed => "claimed", "Reivindicado", Green;
    }
}

taxonomy! {
    /// Whether an admin account can log in.
    UserStatus, "user status" {
        Active => "active", "Ativo", Green;
        Inactive => "inactive", "Inativo", Red;
    }
}

taxonomy! {
    /// Admin account role.
    UserRole, "user role" {
        Admin => "admin", "Administrador", Purple;
        Moderator => "moderator", "Moderador", Blue;
        Viewer => "viewer", "Visualizador", Gray;
    }
}

taxonomy! {
    /// What a delivered donation was for.
    TestimonialCategory, "testimonial category" {
        Moradia => "moradia", "Moradia", Blue;
        Alimentacao => "alimentacao", "Alimentação", Green;
        Educacao => "educacao", "Educação", Purple;
        Saude => "saude", "Saúde", Red;
        Tecnologia => "tecnologia", "Tecnologia", Indigo;
        Essenciais => "essenciais", "Essenciais", Yellow;
        Financeiro => "financeiro", "Financeiro", Gray;
    }
}

impl CampaignStatus {
    /// Plural label used by the dashboard status chart.
    pub fn plural_label(&self) -> &'static str {
        match self {
            Self::Active => "Ativas",
            Self::Pending => "Pendentes",
            Self::Completed => "Encerradas",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values_parse() {
        assert_eq!("active".parse::<CampaignStatus>(), Ok(CampaignStatus::Active));
        assert_eq!(WinnerStatus::Claimed.label(), "Reivindicado");
        assert_eq!(
            TestimonialCategory::Tecnologia.badge().css_class(),
            "bg-indigo-100 text-indigo-800"
        );
        assert_eq!(UserRole::Admin.tone(), Tone::Purple);
    }

    #[test]
    fn test_unknown_value_fails_loudly() {
        let err = "archived".parse::<CampaignStatus>().unwrap_err();
        assert_eq!(err, AdapterError::unknown("campaign status", "archived"));
        assert_eq!(err.raw_value(), Some("archived"));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        assert!("Active".parse::<UserStatus>().is_err());
    }

    #[test]
    fn test_fallback_badge_shows_raw_value() {
        assert_eq!(
            badge_or_fallback::<ParticipantStatus>("suspended"),
            Badge::new("suspended", Tone::Gray)
        );
        assert_eq!(
            badge_or_fallback::<ParticipantStatus>("winner"),
            Badge::new("Vencedor", Tone::Yellow)
        );
    }

    #[test]
    fn test_round_trip_keys() {
        for status in TestimonialCategory::ALL {
            assert_eq!(status.key().parse::<TestimonialCategory>(), Ok(*status));
        }
    }
}
