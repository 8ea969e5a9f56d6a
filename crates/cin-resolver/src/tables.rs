//! Static lookup tables used by the decoder and the known-company source.
//!
//! All tables are plain `(key, value)` slices; they are small enough that a
//! linear scan is cheaper than building a map.

/// Label used when the industry code is not in [`INDUSTRY_CODES`].
pub const DEFAULT_INDUSTRY: &str = "Business activities";

/// Label used when the state code is not in [`STATE_CODES`].
pub const DEFAULT_STATE: &str = "India";

pub const COUNTRY: &str = "India";

/// Entity type code for a private company limited by shares.
pub const PRIVATE_LIMITED_CODE: &str = "PTC";

/// NIC industry code (5 digits) to description
pub static INDUSTRY_CODES: &[(&str, &str)] = &[
    ("01111", "Growing of cereals and crops"),
    ("15400", "Manufacture of food products"),
    ("17111", "Manufacture of textiles"),
    ("24232", "Manufacture of pharmaceutical products"),
    ("45200", "Construction of buildings and civil engineering works"),
    ("51909", "Wholesale trade"),
    ("52190", "Retail trade"),
    ("55101", "Hotels and accommodation"),
    ("60231", "Road transport of freight"),
    ("63040", "Travel agency and tour operator activities"),
    ("65999", "Financial intermediation"),
    ("70100", "Real estate activities with own or leased property"),
    ("72100", "Hardware consultancy"),
    ("72200", "Software publishing, consultancy and supply"),
    ("72300", "Data processing activities"),
    ("72900", "Computer programming, consultancy and related activities"),
    ("74120", "Accounting, book-keeping and auditing activities"),
    ("74140", "Business and management consultancy activities"),
    ("74300", "Advertising and market research"),
    ("74999", "Other business activities"),
    ("80301", "Higher education"),
    ("85110", "Hospital activities"),
    ("92111", "Motion picture and video production"),
    ("93090", "Other service activities"),
];

/// Registrar state code (2 letters) to state name
pub static STATE_CODES: &[(&str, &str)] = &[
    ("AN", "Andaman and Nicobar Islands"),
    ("AP", "Andhra Pradesh"),
    ("AR", "Arunachal Pradesh"),
    ("AS", "Assam"),
    ("BR", "Bihar"),
    ("CH", "Chandigarh"),
    ("CT", "Chhattisgarh"),
    ("DL", "Delhi"),
    ("GA", "Goa"),
    ("GJ", "Gujarat"),
    ("HP", "Himachal Pradesh"),
    ("HR", "Haryana"),
    ("JH", "Jharkhand"),
    ("JK", "Jammu and Kashmir"),
    ("KA", "Karnataka"),
    ("KL", "Kerala"),
    ("MH", "Maharashtra"),
    ("ML", "Meghalaya"),
    ("MN", "Manipur"),
    ("MP", "Madhya Pradesh"),
    ("NL", "Nagaland"),
    ("OR", "Odisha"),
    ("PB", "Punjab"),
    // Registrar of Companies, Pune
    ("PN", "Maharashtra"),
    ("PY", "Puducherry"),
    ("RJ", "Rajasthan"),
    ("TG", "Telangana"),
    ("TN", "Tamil Nadu"),
    ("TR", "Tripura"),
    ("UP", "Uttar Pradesh"),
    ("UR", "Uttarakhand"),
    ("WB", "West Bengal"),
];

/// CINs whose company names have been verified by hand
pub static KNOWN_COMPANIES: &[(&str, &str)] = &[(
    "U72900PN2022PTC211370",
    "Techlify Solutions Private Limited",
)];

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Industry description for a 5-digit code, or [`DEFAULT_INDUSTRY`].
pub fn industry_name(code: &str) -> &'static str {
    lookup(INDUSTRY_CODES, code).unwrap_or(DEFAULT_INDUSTRY)
}

/// State name for a 2-letter code, or [`DEFAULT_STATE`].
pub fn state_name(code: &str) -> &'static str {
    lookup(STATE_CODES, code).unwrap_or(DEFAULT_STATE)
}

/// Human label for the 3-letter entity type code.
pub fn entity_type_name(code: &str) -> &'static str {
    if code == PRIVATE_LIMITED_CODE {
        "Private Limited Company"
    } else {
        "Company"
    }
}

/// Verified name from [`KNOWN_COMPANIES`].
pub fn known_company_name(cin: &str) -> Option<&'static str> {
    lookup(KNOWN_COMPANIES, cin)
}
