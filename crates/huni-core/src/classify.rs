//! Ordered-priority category classifier for raw map elements.
//!
//! Raw elements often satisfy several category heuristics at once, so the
//! rules form an explicit priority table: the first match wins and
//! evaluation stops. Name matching is case-insensitive substring matching
//! against fixed bilingual (English/Indonesian) keyword lists — permissive
//! on purpose, since the source data is crowd-sourced and inconsistently
//! tagged.

use std::collections::BTreeMap;

use crate::category::Category;

type Tags = BTreeMap<String, String>;

/// One entry in the priority table.
struct CategoryRule {
    category: Category,
    matches: fn(&Tags) -> bool,
}

/// The priority table, highest priority first.
///
/// Safety sits last deliberately: most of its signal tags (lamps, lit
/// ways, crossings, sidewalks) overlap with walkability and
/// accessibility and should only land here when nothing more specific
/// matched.
static RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Education,
        matches: is_education,
    },
    CategoryRule {
        category: Category::Police,
        matches: is_police,
    },
    CategoryRule {
        category: Category::Market,
        matches: is_market,
    },
    CategoryRule {
        category: Category::Health,
        matches: is_health,
    },
    CategoryRule {
        category: Category::Transport,
        matches: is_transport,
    },
    CategoryRule {
        category: Category::Religious,
        matches: is_religious,
    },
    CategoryRule {
        category: Category::Recreation,
        matches: is_recreation,
    },
    CategoryRule {
        category: Category::Walkability,
        matches: is_walkability,
    },
    CategoryRule {
        category: Category::Accessibility,
        matches: is_accessibility,
    },
    CategoryRule {
        category: Category::Safety,
        matches: is_safety,
    },
];

/// Infer the semantic category of a raw element.
///
/// `bucket` is the category of the query that returned the element; it
/// is kept when no rule matches.
#[must_use]
pub fn classify(tags: &Tags, bucket: Category) -> Category {
    RULES
        .iter()
        .find(|rule| (rule.matches)(tags))
        .map_or(bucket, |rule| rule.category)
}

fn tag<'a>(tags: &'a Tags, key: &str) -> Option<&'a str> {
    tags.get(key).map(String::as_str)
}

fn tag_is(tags: &Tags, key: &str, value: &str) -> bool {
    tag(tags, key) == Some(value)
}

fn tag_in(tags: &Tags, key: &str, values: &[&str]) -> bool {
    tag(tags, key).is_some_and(|v| values.contains(&v))
}

fn lower_name(tags: &Tags) -> Option<String> {
    tag(tags, "name").map(str::to_lowercase)
}

fn name_contains_any(tags: &Tags, keywords: &[&str]) -> bool {
    lower_name(tags).is_some_and(|name| keywords.iter().any(|kw| name.contains(kw)))
}

const EDUCATION_AMENITIES: &[&str] = &["school", "university", "college", "kindergarten", "library"];
const EDUCATION_NAMES: &[&str] = &[
    "sekolah",
    "universitas",
    "kampus",
    "madrasah",
    "pesantren",
    "paud",
    "tk",
    "school",
    "library",
];

fn is_education(tags: &Tags) -> bool {
    tag_in(tags, "amenity", EDUCATION_AMENITIES) || name_contains_any(tags, EDUCATION_NAMES)
}

const POLICE_NAMES: &[&str] = &[
    "polisi",
    "polres",
    "polsek",
    "polda",
    "satlantas",
    "satpol",
    "police",
];

fn is_police(tags: &Tags) -> bool {
    tag_is(tags, "amenity", "police") || name_contains_any(tags, POLICE_NAMES)
}

const FOOD_AMENITIES: &[&str] = &[
    "restaurant",
    "cafe",
    "fast_food",
    "food_court",
    "bar",
    "pub",
    "ice_cream",
    "coffee_shop",
];
const FUEL_AMENITIES: &[&str] = &["fuel", "gas_station"];
const MARKET_NAMES: &[&str] = &[
    "spbu",
    "pertamina",
    "shell",
    "pasar",
    "market",
    "mall",
    "plaza",
    "toko",
    "warung",
    "minimarket",
    "indomaret",
    "alfamart",
];

fn is_market(tags: &Tags) -> bool {
    tags.contains_key("shop")
        || tag_in(tags, "amenity", FOOD_AMENITIES)
        || tag_in(tags, "amenity", FUEL_AMENITIES)
        || name_contains_any(tags, MARKET_NAMES)
}

const HEALTH_AMENITIES: &[&str] = &[
    "hospital",
    "clinic",
    "doctors",
    "dentist",
    "pharmacy",
    "veterinary",
];
const HEALTH_NAMES: &[&str] = &[
    "rumah sakit",
    "klinik",
    "apotek",
    "apotik",
    "puskesmas",
    "posyandu",
    "hospital",
    "clinic",
    "pharmacy",
];

fn is_health(tags: &Tags) -> bool {
    if tag_in(tags, "amenity", HEALTH_AMENITIES) || name_contains_any(tags, HEALTH_NAMES) {
        return true;
    }
    // "RS" abbreviates "rumah sakit", but Indonesian school names also
    // produce the substring (e.g. "universitas"); the guard keeps those
    // out.
    name_contains_any(tags, &["rs "]) && !name_contains_any(tags, EDUCATION_NAMES)
}

const TRANSPORT_NAMES: &[&str] = &[
    "terminal",
    "stasiun",
    "station",
    "mrt",
    "lrt",
    "angkot",
    "transjakarta",
    "halte",
];

fn is_transport(tags: &Tags) -> bool {
    tag_in(tags, "public_transport", &["platform", "station", "stop_position"])
        || tag_is(tags, "highway", "bus_stop")
        || tag_in(tags, "railway", &["station", "halt", "tram_stop"])
        || tag_is(tags, "amenity", "bus_station")
        || name_contains_any(tags, TRANSPORT_NAMES)
}

const RELIGIOUS_NAMES: &[&str] = &[
    "masjid",
    "musholla",
    "mushola",
    "gereja",
    "katedral",
    "pura",
    "vihara",
    "wihara",
    "klenteng",
    "mosque",
    "church",
    "temple",
];

fn is_religious(tags: &Tags) -> bool {
    tag_is(tags, "amenity", "place_of_worship") || name_contains_any(tags, RELIGIOUS_NAMES)
}

const RECREATION_LEISURE: &[&str] = &[
    "park",
    "playground",
    "sports_centre",
    "fitness_centre",
    "swimming_pool",
    "garden",
];
const RECREATION_AMENITIES: &[&str] = &["cinema", "theatre", "community_centre"];
const RECREATION_NAMES: &[&str] = &[
    "taman",
    "lapangan",
    "gelanggang",
    "bioskop",
    "kolam renang",
    "gym",
    "fitness",
    "waterpark",
    "park",
];

fn is_recreation(tags: &Tags) -> bool {
    tag_in(tags, "leisure", RECREATION_LEISURE)
        || tag_in(tags, "amenity", RECREATION_AMENITIES)
        || name_contains_any(tags, RECREATION_NAMES)
}

const PEDESTRIAN_HIGHWAYS: &[&str] = &[
    "footway",
    "pedestrian",
    "path",
    "steps",
    "bridleway",
    "living_street",
];
const MARKED_CROSSINGS: &[&str] = &["zebra", "traffic_signals", "uncontrolled", "marked"];

fn has_sidewalk(tags: &Tags) -> bool {
    tag(tags, "sidewalk").is_some_and(|v| v != "no" && v != "none")
}

fn is_low_speed(tags: &Tags) -> bool {
    tag(tags, "maxspeed")
        .and_then(|v| v.split_whitespace().next())
        .and_then(|v| v.parse::<u32>().ok())
        .is_some_and(|kmh| kmh <= 30)
}

fn is_pedestrian_crossing(tags: &Tags) -> bool {
    tag_is(tags, "highway", "crossing")
        && (tag_in(tags, "crossing", MARKED_CROSSINGS) || tag_is(tags, "foot", "yes"))
}

fn is_green_infrastructure(tags: &Tags) -> bool {
    tag_in(tags, "natural", &["tree", "tree_row"])
        || tag_in(tags, "landuse", &["grass", "village_green"])
}

fn is_walkability(tags: &Tags) -> bool {
    tag_in(tags, "highway", PEDESTRIAN_HIGHWAYS)
        || has_sidewalk(tags)
        || is_pedestrian_crossing(tags)
        || tag_is(tags, "amenity", "bench")
        || tag_is(tags, "bench", "yes")
        || tag_is(tags, "amenity", "drinking_water")
        || tag_is(tags, "highway", "street_lamp")
        || tag_is(tags, "lit", "yes")
        || tags.contains_key("traffic_calming")
        || is_low_speed(tags)
        || is_green_infrastructure(tags)
        || ((tag_is(tags, "bridge", "yes") || tag_is(tags, "tunnel", "yes"))
            && tag_is(tags, "foot", "yes"))
}

fn is_accessibility(tags: &Tags) -> bool {
    tag_is(tags, "barrier", "kerb")
        || tag_in(tags, "kerb", &["lowered", "flush"])
        || tag_is(tags, "highway", "elevator")
        || tag_is(tags, "ramp:wheelchair", "yes")
        || (tag_is(tags, "highway", "steps") && tag_is(tags, "ramp", "yes"))
        || (tag_is(tags, "amenity", "parking")
            && (tags.contains_key("capacity:disabled")
                || tag_is(tags, "parking_space", "disabled")))
        || tag_is(tags, "tactile_paving", "yes")
        || (tag_is(tags, "amenity", "toilets") && tag_is(tags, "wheelchair", "yes"))
        || tag_is(tags, "wheelchair", "designated")
}

fn is_safety(tags: &Tags) -> bool {
    tag_is(tags, "highway", "street_lamp")
        || tag_is(tags, "lit", "yes")
        || tag_is(tags, "highway", "crossing")
        || tags.contains_key("traffic_calming")
        || tags.contains_key("maxspeed")
        || tags.contains_key("sidewalk")
        || tag_in(tags, "amenity", &["fire_station", "hospital"])
        || tag_is(tags, "man_made", "surveillance")
        || tags.contains_key("surveillance")
}
