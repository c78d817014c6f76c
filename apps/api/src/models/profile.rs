use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Declares a form enum whose serialized form is its display label.
macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            /// Every choice, in the order the form lists them.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum!(
    Industry {
        Technology => "Technology",
        Healthcare => "Healthcare",
        Finance => "Finance",
        Education => "Education",
        Retail => "Retail",
        Other => "Other",
    }
);

labelled_enum!(
    /// Used both for the company-wide audience and per-product audience.
    Audience {
        B2B => "B2B",
        B2C => "B2C",
        Millennials => "Millennials",
        GenZ => "Gen Z",
        Parents => "Parents",
        Professionals => "Professionals",
        Students => "Students",
        Retirees => "Retirees",
    }
);

labelled_enum!(
    BrandVoice {
        Professional => "Professional",
        Casual => "Casual",
        Playful => "Playful",
        Formal => "Formal",
        Friendly => "Friendly",
    }
);

/// Company details captured on the "Company Details" view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub industry: Industry,
    pub target_audience: Audience,
    pub brand_voice: BrandVoice,
    pub key_products: String,
}

/// A profile as stored in a session, stamped with when it was saved.
#[derive(Debug, Clone, Serialize)]
pub struct SavedProfile {
    #[serde(flatten)]
    pub profile: CompanyProfile,
    pub saved_at: DateTime<Utc>,
}
