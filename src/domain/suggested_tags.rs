// src/domain/suggested_tags.rs

const VENUE: &[&str] = &[
    "Exterior",
    "Ceremony Space",
    "Reception Hall",
    "Garden",
    "Bridal Suite",
    "Dance Floor",
    "Night View",
];
const CATERING: &[&str] = &[
    "Appetizers",
    "Main Course",
    "Desserts",
    "Buffet Setup",
    "Plated Service",
    "Bar Service",
];
const PHOTOGRAPHY: &[&str] = &[
    "Ceremony",
    "Portraits",
    "Candid",
    "Getting Ready",
    "Reception",
    "Details",
    "Engagement",
];
const VIDEOGRAPHY: &[&str] = &[
    "Highlights",
    "Ceremony",
    "Speeches",
    "First Dance",
    "Drone Footage",
];
const FLORIST: &[&str] = &[
    "Bridal Bouquet",
    "Centerpieces",
    "Ceremony Arch",
    "Boutonnieres",
    "Table Arrangements",
];
const DECOR: &[&str] = &[
    "Table Settings",
    "Lighting",
    "Backdrops",
    "Centerpieces",
    "Signage",
];
const MUSIC: &[&str] = &["Live Band", "DJ Setup", "Ceremony Music", "Dance Floor"];
const ATTIRE: &[&str] = &[
    "Bridal Gowns",
    "Suits",
    "Bridesmaid Dresses",
    "Accessories",
    "Fittings",
];
const MAKEUP: &[&str] = &["Bridal Makeup", "Hair Styling", "Before and After", "Party Looks"];
const CAKE: &[&str] = &["Wedding Cakes", "Cupcakes", "Dessert Table", "Tastings"];
const PLANNER: &[&str] = &["Setup", "Coordination", "Styled Shoots", "Timeline"];
const GENERIC: &[&str] = &["Portfolio", "Featured", "Recent Work", "Behind the Scenes"];

/// Suggested tag names for a vendor category, with a generic fallback for unknown ones.
pub fn get_suggested_tags(category: &str) -> &'static [&'static str] {
    match category.trim().to_lowercase().as_str() {
        "venue" => VENUE,
        "catering" => CATERING,
        "photography" => PHOTOGRAPHY,
        "videography" => VIDEOGRAPHY,
        "florist" => FLORIST,
        "decor" => DECOR,
        "music" => MUSIC,
        "attire" => ATTIRE,
        "makeup" => MAKEUP,
        "cake" => CAKE,
        "planner" => PLANNER,
        _ => GENERIC,
    }
}

/// Category keys with a dedicated suggestion list
pub fn known_categories() -> &'static [&'static str] {
    &[
        "venue",
        "catering",
        "photography",
        "videography",
        "florist",
        "decor",
        "music",
        "attire",
        "makeup",
        "cake",
        "planner",
    ]
}
