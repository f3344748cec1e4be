//! Themes and their archetype tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Archetype id shared by every theme for the goal room.
pub const VAULT: &str = "vault";

/// A thematic room kind.
#[derive(Debug, PartialEq, Eq)]
pub struct Archetype {
    /// Stable identifier, e.g. `great_hall`.
    pub id: &'static str,
    /// Adjectives a room of this kind may roll.
    pub adjectives: &'static [&'static str],
    /// Flavor lines; one is picked per room when it is described.
    pub flavor: &'static [&'static str],
}

impl Archetype {
    /// Title-cased display name, e.g. `Great Hall`.
    pub fn display_name(&self) -> String {
        self.id
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    /// Returns true for the goal room kind.
    pub fn is_vault(&self) -> bool {
        self.id == VAULT
    }
}

/// Template for one of a theme's three goal artifacts.
#[derive(Debug, PartialEq, Eq)]
pub struct ArtifactSpec {
    /// Slug used in the `artifact:<slug>` tag.
    pub slug: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Examine text.
    pub description: &'static str,
}

/// Static text for a theme's generated items.
#[derive(Debug, PartialEq, Eq)]
pub struct ItemTemplate {
    /// Display name.
    pub name: &'static str,
    /// Examine text.
    pub description: &'static str,
}

/// The narrative setting of a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Stone halls and old magic.
    #[default]
    Fantasy,
    /// A derelict station.
    Scifi,
    /// A house that should have been left alone.
    Horror,
}

impl Theme {
    /// Every theme.
    pub const ALL: [Theme; 3] = [Self::Fantasy, Self::Scifi, Self::Horror];

    /// Lowercase identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fantasy => "fantasy",
            Self::Scifi => "scifi",
            Self::Horror => "horror",
        }
    }

    /// The archetype table rooms are drawn from.
    pub fn archetypes(&self) -> &'static [Archetype] {
        match self {
            Self::Fantasy => FANTASY,
            Self::Scifi => SCIFI,
            Self::Horror => HORROR,
        }
    }

    /// Look up an archetype by id.
    pub fn archetype(&self, id: &str) -> Option<&'static Archetype> {
        self.archetypes().iter().find(|a| a.id == id)
    }

    /// The goal room archetype.
    pub fn vault(&self) -> &'static Archetype {
        self.archetype(VAULT)
            .unwrap_or(&self.archetypes()[self.archetypes().len() - 1])
    }

    /// Scheme used in `key:<scheme><n>` tags.
    pub fn key_scheme(&self) -> &'static str {
        match self {
            Self::Fantasy => "rune",
            Self::Scifi => "cipher",
            Self::Horror => "bone",
        }
    }

    /// Noun for ordinary keys, e.g. `rune key`.
    pub fn key(&self) -> ItemTemplate {
        match self {
            Self::Fantasy => ItemTemplate {
                name: "rune key",
                description: "An iron key etched with a single glowing rune.",
            },
            Self::Scifi => ItemTemplate {
                name: "cipher card",
                description: "A scuffed access card. Its chip still holds a cipher.",
            },
            Self::Horror => ItemTemplate {
                name: "bone key",
                description: "A key whittled from something's finger bone.",
            },
        }
    }

    /// Narrative note left next to each key.
    pub fn note(&self) -> ItemTemplate {
        match self {
            Self::Fantasy => ItemTemplate {
                name: "vellum scrap",
                description: "Faded ink on vellum.",
            },
            Self::Scifi => ItemTemplate {
                name: "data slip",
                description: "A flimsy printout from a maintenance log.",
            },
            Self::Horror => ItemTemplate {
                name: "torn page",
                description: "A page torn from a diary, the ink run with damp.",
            },
        }
    }

    /// The immovable centrepiece of the vault.
    pub fn goal_fixture(&self) -> ItemTemplate {
        match self {
            Self::Fantasy => ItemTemplate {
                name: "warded seal",
                description: "A great seal set into the floor with three empty hollows.",
            },
            Self::Scifi => ItemTemplate {
                name: "lockdown console",
                description: "A console demanding three authentication components.",
            },
            Self::Horror => ItemTemplate {
                name: "chained altar",
                description: "An altar bound in chains, three offerings missing from its top.",
            },
        }
    }

    /// The three goal artifacts.
    pub fn artifacts(&self) -> &'static [ArtifactSpec; 3] {
        match self {
            Self::Fantasy => &FANTASY_ARTIFACTS,
            Self::Scifi => &SCIFI_ARTIFACTS,
            Self::Horror => &HORROR_ARTIFACTS,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fantasy" => Ok(Self::Fantasy),
            "scifi" | "sci-fi" => Ok(Self::Scifi),
            "horror" => Ok(Self::Horror),
            other => Err(CoreError::UnknownTheme(other.to_string())),
        }
    }
}

static FANTASY: &[Archetype] = &[
    Archetype {
        id: "great_hall",
        adjectives: &["vaulted", "draughty"],
        flavor: &["Banners stir in a draft.", "Footsteps echo off stone."],
    },
    Archetype {
        id: "archives",
        adjectives: &["dusty", "silent"],
        flavor: &["Dust motes hang in the lantern light.", "Old bindings creak softly."],
    },
    Archetype {
        id: "laboratory",
        adjectives: &["sooty", "cluttered"],
        flavor: &["Glassware clinks faintly.", "A herbal tang cuts the air."],
    },
    Archetype {
        id: "vault",
        adjectives: &["cold", "secure"],
        flavor: &["The stone is cold to the touch.", "Locks nest like steel serpents."],
    },
    Archetype {
        id: "observatory",
        adjectives: &["dim", "domed"],
        flavor: &[
            "The ceiling is worked with constellations.",
            "A brass armillary ticks once.",
        ],
    },
    Archetype {
        id: "workshop",
        adjectives: &["greasy", "crowded"],
        flavor: &["Shavings curl on the floor.", "Tools lie in careful disarray."],
    },
    Archetype {
        id: "catacombs",
        adjectives: &["narrow", "crumbling"],
        flavor: &["Names fade on the old markers.", "Stale air presses close."],
    },
    Archetype {
        id: "garden",
        adjectives: &["overgrown", "walled"],
        flavor: &["Wind whispers in ivy.", "Faint petrichor lingers."],
    },
    Archetype {
        id: "chapel",
        adjectives: &["hushed", "candlelit"],
        flavor: &["Candles gutter.", "A hush settles on the pews."],
    },
    Archetype {
        id: "library",
        adjectives: &["towering", "musty"],
        flavor: &["Ink stains the desk.", "Loose pages rustle at nothing."],
    },
];

static SCIFI: &[Archetype] = &[
    Archetype {
        id: "cryo_lab",
        adjectives: &["frosted", "humming"],
        flavor: &["Frost rims the seals.", "Status lights blink a patient green."],
    },
    Archetype {
        id: "server_room",
        adjectives: &["chilled", "blinking"],
        flavor: &["Cold air hums through racks.", "Fiber optics pulse like veins."],
    },
    Archetype {
        id: "reactor_core",
        adjectives: &["shielded", "throbbing"],
        flavor: &["A low thrum vibrates the floor.", "Radiation shields glint dully."],
    },
    Archetype {
        id: "observation_deck",
        adjectives: &["panoramic", "silent"],
        flavor: &["Stars spill across the viewport.", "Panels reflect pale light."],
    },
    Archetype {
        id: "cargo_bay",
        adjectives: &["cavernous", "scarred"],
        flavor: &["Mag clamps scar the deck.", "Crates bear hazard sigils."],
    },
    Archetype {
        id: "medbay",
        adjectives: &["sterile", "abandoned"],
        flavor: &["Antiseptic nips at your nose.", "Monitors blink quietly."],
    },
    Archetype {
        id: "maintenance",
        adjectives: &["cramped", "leaking"],
        flavor: &["Coolant beads on pipes.", "Tools float in a netted pouch."],
    },
    Archetype {
        id: "command",
        adjectives: &["darkened", "orderly"],
        flavor: &["Holo-screens ghost your reflection.", "Chairs sit at rigid attention."],
    },
    Archetype {
        id: "airlock",
        adjectives: &["pressurised", "narrow"],
        flavor: &["Warning stripes peel.", "A faint hiss betrays pressure."],
    },
    Archetype {
        id: "drone_hangar",
        adjectives: &["echoing", "oily"],
        flavor: &["Dull carapaces line the wall.", "Servos whine somewhere above."],
    },
    Archetype {
        id: "vault",
        adjectives: &["armoured", "sealed"],
        flavor: &["Layers of composite plating overlap.", "The lock reads your silence."],
    },
];

static HORROR: &[Archetype] = &[
    Archetype {
        id: "cellar",
        adjectives: &["damp", "low"],
        flavor: &["Moisture beads on stone.", "The smell of earth and iron."],
    },
    Archetype {
        id: "morgue",
        adjectives: &["chilled", "tiled"],
        flavor: &["Drawers sit a little too still.", "Cold leeches up your legs."],
    },
    Archetype {
        id: "ward",
        adjectives: &["empty", "flickering"],
        flavor: &["Curtains stir without wind.", "A monitor clicks on and off."],
    },
    Archetype {
        id: "chapel",
        adjectives: &["desecrated", "tilted"],
        flavor: &["Pews list to one side.", "Wax pools like melted bone."],
    },
    Archetype {
        id: "attic",
        adjectives: &["stifling", "cobwebbed"],
        flavor: &["Rafters crowd low.", "Dust avalanches at your step."],
    },
    Archetype {
        id: "boiler_room",
        adjectives: &["sweltering", "rusted"],
        flavor: &["Pipes tick and settle.", "Heat breathes from the walls."],
    },
    Archetype {
        id: "ritual_chamber",
        adjectives: &["scorched", "circular"],
        flavor: &["Symbols scab the floor.", "An echo answers late."],
    },
    Archetype {
        id: "nursery",
        adjectives: &["faded", "quiet"],
        flavor: &["A mobile turns once.", "Paint flakes like ash."],
    },
    Archetype {
        id: "dining_room",
        adjectives: &["long", "rotting"],
        flavor: &["Chairs face the wrong way.", "Utensils bite into wood."],
    },
    Archetype {
        id: "vault",
        adjectives: &["iron", "airless"],
        flavor: &["Chains rasp across the floor.", "Something waits behind the door."],
    },
];

static FANTASY_ARTIFACTS: [ArtifactSpec; 3] = [
    ArtifactSpec {
        slug: "sunstone",
        name: "sunstone shard",
        description: "A shard of amber crystal, warm as a hearth.",
    },
    ArtifactSpec {
        slug: "moonsilver_chalice",
        name: "moonsilver chalice",
        description: "A chalice that holds a little moonlight even in the dark.",
    },
    ArtifactSpec {
        slug: "starlit_crown",
        name: "starlit crown",
        description: "A thin circlet pricked with points of light.",
    },
];

static SCIFI_ARTIFACTS: [ArtifactSpec; 3] = [
    ArtifactSpec {
        slug: "quantum_core",
        name: "quantum core",
        description: "A fist-sized core that flickers between two weights.",
    },
    ArtifactSpec {
        slug: "nav_crystal",
        name: "nav crystal",
        description: "A lattice of star charts grown in glass.",
    },
    ArtifactSpec {
        slug: "ai_fragment",
        name: "ai fragment",
        description: "A shard of the station intelligence, still murmuring.",
    },
];

static HORROR_ARTIFACTS: [ArtifactSpec; 3] = [
    ArtifactSpec {
        slug: "silver_locket",
        name: "silver locket",
        description: "The portrait inside has had its face scratched out.",
    },
    ArtifactSpec {
        slug: "cracked_mirror",
        name: "cracked mirror",
        description: "Your reflection is a moment late.",
    },
    ArtifactSpec {
        slug: "wax_doll",
        name: "wax doll",
        description: "A doll of yellowed wax with pins where the eyes should be.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_theme_has_a_vault() {
        for theme in Theme::ALL {
            assert!(theme.vault().is_vault(), "{theme} has no vault");
        }
    }

    #[test]
    fn archetype_ids_are_unique_per_theme() {
        for theme in Theme::ALL {
            let mut ids: Vec<_> = theme.archetypes().iter().map(|a| a.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), theme.archetypes().len());
        }
    }

    #[test]
    fn tables_are_populated() {
        for theme in Theme::ALL {
            for arch in theme.archetypes() {
                assert!(!arch.adjectives.is_empty(), "{} has no adjectives", arch.id);
                assert!(!arch.flavor.is_empty(), "{} has no flavor", arch.id);
            }
        }
    }

    #[test]
    fn display_name_title_cases() {
        let arch = Theme::Scifi.archetype("observation_deck").unwrap();
        assert_eq!(arch.display_name(), "Observation Deck");
    }

    #[test]
    fn parse_theme() {
        assert_eq!("Fantasy".parse::<Theme>().unwrap(), Theme::Fantasy);
        assert_eq!("sci-fi".parse::<Theme>().unwrap(), Theme::Scifi);
        assert!("western".parse::<Theme>().is_err());
    }

    #[test]
    fn artifact_slugs_are_distinct() {
        for theme in Theme::ALL {
            let [a, b, c] = theme.artifacts();
            assert!(a.slug != b.slug && b.slug != c.slug && a.slug != c.slug);
        }
    }
}
