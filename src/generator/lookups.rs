//! Fixed reference data for synthetic records

/// Product categories with their subcategories
pub const CATEGORIES: [(&str, [&str; 5]); 6] = [
    ("Electronics", ["Computers", "Phones", "Audio", "Gaming", "Accessories"]),
    ("Clothing", ["Men", "Women", "Children", "Shoes", "Accessories"]),
    ("Home & Garden", ["Furniture", "Kitchen", "Bedroom", "Garden", "Tools"]),
    ("Sports", ["Fitness", "Outdoor", "Team Sports", "Water Sports", "Winter Sports"]),
    ("Books", ["Fiction", "Non-Fiction", "Educational", "Children", "Reference"]),
    ("Automotive", ["Parts", "Accessories", "Tools", "Care", "Electronics"]),
];

/// Brands per category, in `CATEGORIES` order
pub const BRANDS: [[&str; 5]; 6] = [
    ["TechCorp", "DigitalPlus", "InnovateTech", "PowerElectronics", "SmartDevices"],
    ["StyleMax", "FashionForward", "ComfortWear", "UrbanStyle", "ClassicFit"],
    ["HomeComfort", "LivingSpace", "CozyHome", "ModernLiving", "GardenPro"],
    ["ActiveLife", "SportsPro", "FitnessFlex", "OutdoorAdventure", "TeamSpirit"],
    ["KnowledgePress", "StoryBooks", "LearnMore", "ReadWell", "BookCraft"],
    ["AutoPro", "CarCare", "DriveSmart", "VehiclePlus", "MotorMax"],
];

/// Retail price range per category, in `CATEGORIES` order
pub const PRICE_RANGES: [(f64, f64); 6] = [
    (20.0, 2000.0),
    (15.0, 300.0),
    (10.0, 1500.0),
    (25.0, 800.0),
    (8.0, 100.0),
    (15.0, 500.0),
];

/// Base stock level per category, in `CATEGORIES` order
pub const INVENTORY_BASE: [i64; 6] = [25, 100, 40, 30, 50, 15];

/// Geographic regions and their states
pub const REGIONS: [(&str, &[&str]); 4] = [
    ("West", &["CA", "WA", "OR", "NV", "AZ", "UT", "CO", "ID", "MT", "WY"]),
    ("East", &["NY", "NJ", "PA", "CT", "MA", "ME", "VT", "NH", "RI"]),
    (
        "South",
        &["TX", "FL", "GA", "NC", "SC", "VA", "TN", "AL", "MS", "LA", "AR", "OK"],
    ),
    (
        "Midwest",
        &["IL", "IN", "OH", "MI", "WI", "MN", "IA", "MO", "ND", "SD", "NE", "KS"],
    ),
];

/// Hours from GMT for a state, Eastern when unknown
pub fn gmt_offset(state: &str) -> f64 {
    match state {
        "CA" | "WA" | "OR" | "NV" => -8.0,
        "AZ" | "UT" | "CO" | "ID" | "MT" | "WY" => -7.0,
        "TX" | "OK" | "AR" | "LA" | "MS" | "AL" | "TN" | "IL" | "WI" | "MN" | "IA" | "MO"
        | "ND" | "SD" | "NE" | "KS" => -6.0,
        _ => -5.0,
    }
}

/// Month multipliers (January first) for categories with seasonal demand
pub const SEASONAL_PATTERNS: [(&str, [f64; 12]); 4] = [
    (
        "Electronics",
        [0.8, 0.9, 1.0, 1.0, 1.0, 1.1, 1.1, 1.0, 1.0, 1.1, 1.3, 1.8],
    ),
    (
        "Clothing",
        [0.7, 0.8, 1.2, 1.3, 1.1, 1.0, 0.9, 1.0, 1.2, 1.1, 1.4, 1.6],
    ),
    (
        "Home & Garden",
        [0.8, 0.9, 1.3, 1.4, 1.3, 1.1, 1.0, 1.0, 1.1, 1.0, 1.1, 1.2],
    ),
    (
        "Sports",
        [1.2, 1.1, 1.2, 1.3, 1.4, 1.3, 1.2, 1.1, 1.2, 1.1, 1.0, 1.3],
    ),
];

/// Income bands: lower bound, upper bound, share of households
pub const INCOME_BANDS: [(i64, i64, f64); 7] = [
    (0, 10_000, 0.08),
    (10_000, 20_000, 0.12),
    (20_000, 30_000, 0.15),
    (30_000, 50_000, 0.25),
    (50_000, 75_000, 0.20),
    (75_000, 100_000, 0.12),
    (100_000, 200_000, 0.08),
];

/// Return reasons with their relative frequency
pub const REASONS: [(&str, f64); 12] = [
    ("Defective item", 14.0),
    ("Wrong item shipped", 8.0),
    ("Item not as described", 11.0),
    ("Changed mind", 15.0),
    ("Found better price", 9.0),
    ("Gift return", 7.0),
    ("Size too small", 10.0),
    ("Size too large", 10.0),
    ("Color not as expected", 5.0),
    ("Damaged in shipping", 6.0),
    ("Arrived too late", 3.0),
    ("Duplicate order", 2.0),
];

/// Store formats: name, floor space, staff
pub const STORE_TYPES: [(&str, i64, i64); 4] = [
    ("Superstore", 80_000, 200),
    ("Department Store", 50_000, 150),
    ("Specialty Store", 15_000, 50),
    ("Outlet Store", 25_000, 75),
];

/// Shipping methods: code, description, carriers
pub const SHIP_MODES: [(&str, &str, &[&str]); 5] = [
    ("GROUND", "Standard Ground", &["UPS", "FedEx", "USPS"]),
    ("EXPRESS", "2-Day Express", &["UPS", "FedEx"]),
    ("OVERNIGHT", "Next Day Air", &["UPS", "FedEx"]),
    ("FREIGHT", "Freight Service", &["Yellow", "Conway"]),
    ("MAIL", "Regular Mail", &["USPS"]),
];

/// Promotion campaigns: name, start month, end month, featured categories
pub const PROMOTIONS: [(&str, u32, u32, &[&str]); 6] = [
    ("Back to School", 8, 9, &["Electronics", "Books", "Clothing"]),
    ("Black Friday", 11, 11, &["Electronics", "Home & Garden"]),
    ("Holiday Shopping", 12, 12, &["Electronics", "Clothing", "Books"]),
    ("Spring Sale", 3, 4, &["Home & Garden", "Clothing"]),
    ("Summer Clearance", 7, 8, &["Sports", "Clothing"]),
    ("End of Year", 12, 12, &["Electronics", "Automotive"]),
];

pub const FIRST_NAMES: [&str; 16] = [
    "John", "Mary", "David", "Sarah", "Michael", "Lisa", "Robert", "Jennifer", "James", "Linda",
    "William", "Susan", "Thomas", "Karen", "Daniel", "Nancy",
];

pub const LAST_NAMES: [&str; 16] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Wilson",
    "Moore", "Taylor", "Anderson", "Thomas", "Jackson", "White", "Harris",
];

pub const CITIES: [&str; 12] = [
    "Springfield",
    "Riverside",
    "Franklin",
    "Georgetown",
    "Madison",
    "Oak Hill",
    "Fairview",
    "Greenville",
    "Salem",
    "Clinton",
    "Marion",
    "Ashland",
];

pub const STREET_NAMES: [&str; 16] = [
    "Main", "Oak", "Pine", "Maple", "Cedar", "Elm", "Washington", "Lake", "Hill", "Park",
    "Sunset", "Ridge", "River", "Church", "Highland", "Meadow",
];

pub const STREET_TYPES: [&str; 7] = ["St", "Ave", "Blvd", "Dr", "Ln", "Rd", "Way"];

pub const SALUTATIONS: [&str; 5] = ["Mr.", "Mrs.", "Ms.", "Dr.", "Prof."];

pub const EDUCATION: [&str; 5] = [
    "Primary",
    "Secondary",
    "College",
    "Advanced Degree",
    "Unknown",
];

pub const BUY_POTENTIAL: [&str; 6] = [
    "Unknown",
    "0-500",
    "501-1000",
    "1001-5000",
    "5001-10000",
    "10001+",
];

pub const COLORS: [&str; 10] = [
    "red", "blue", "green", "black", "white", "gray", "brown", "yellow", "purple", "orange",
];

pub const SIZES: [&str; 7] = ["XS", "S", "M", "L", "XL", "XXL", "OS"];

pub const UNITS: [&str; 5] = ["Each", "Pair", "Set", "Dozen", "Case"];

pub const CONTAINERS: [&str; 5] = ["Box", "Bag", "Case", "Carton", "Package"];

pub const LOCATION_TYPES: [&str; 4] = ["apartment", "condo", "single family", "unknown"];

/// Company that owns every store, site and call center
pub const COMPANY_NAME: &str = "RetailCorp";

pub const COUNTRY: &str = "United States";

/// Turn a display name into a URL path segment
pub fn slug(name: &str) -> String {
    name.to_lowercase()
        .replace(" & ", "-and-")
        .replace(' ', "-")
}
