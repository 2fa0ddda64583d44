use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: [&str; 24] = [
    "BROOKDALE", "CARRIAGE", "CEDAR", "CHERRY", "EAGLE", "ELM", "EVERGREEN", "FOREST",
    "HIGHLAND", "HUNTER", "LAKE", "LINCOLN", "MAPLE", "OAK", "PINE", "PALM", "PRARIE",
    "PROVIDENCE", "SHADY", "SILVER", "SUMMER", "WILD", "WILLOW", "WINTER",
];

const LAST_NAMES: [&str; 25] = [
    "ACRES", "CANYON", "COURTS", "COVE", "CREST", "CROSSING", "FALLS", "FARMS", "GLEN", "GROVE",
    "HEIGHTS", "HILLS", "KNOLL", "LAKE", "LANDING", "MEADOWS", "PARK", "PINES", "PLACE",
    "RIDGE", "RUN", "SPRINGS", "TRAILS", "VISTA", "WOODS",
];

/// Two-word neighborhood name, e.g. `MAPLE RIDGE`.
pub(crate) fn neighborhood_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("NOWHERE");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("FLATS");
    format!("{first} {last}")
}
