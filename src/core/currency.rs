//! Static currency metadata: display names and flag glyphs.

/// Code, display name, flag. Kept sorted by code.
const CURRENCIES: &[(&str, &str, &str)] = &[
    ("AUD", "Australian Dollar", "🇦🇺"),
    ("BGN", "Bulgarian Lev", "🇧🇬"),
    ("BRL", "Brazilian Real", "🇧🇷"),
    ("CAD", "Canadian Dollar", "🇨🇦"),
    ("CHF", "Swiss Franc", "🇨🇭"),
    ("CNY", "Chinese Yuan", "🇨🇳"),
    ("CZK", "Czech Koruna", "🇨🇿"),
    ("DKK", "Danish Krone", "🇩🇰"),
    ("EUR", "Euro", "🇪🇺"),
    ("GBP", "British Pound", "🇬🇧"),
    ("HKD", "Hong Kong Dollar", "🇭🇰"),
    ("HUF", "Hungarian Forint", "🇭🇺"),
    ("IDR", "Indonesian Rupiah", "🇮🇩"),
    ("ILS", "Israeli New Shekel", "🇮🇱"),
    ("INR", "Indian Rupee", "🇮🇳"),
    ("ISK", "Icelandic Krona", "🇮🇸"),
    ("JPY", "Japanese Yen", "🇯🇵"),
    ("KRW", "South Korean Won", "🇰🇷"),
    ("MXN", "Mexican Peso", "🇲🇽"),
    ("MYR", "Malaysian Ringgit", "🇲🇾"),
    ("NOK", "Norwegian Krone", "🇳🇴"),
    ("NZD", "New Zealand Dollar", "🇳🇿"),
    ("PHP", "Philippine Peso", "🇵🇭"),
    ("PLN", "Polish Zloty", "🇵🇱"),
    ("RON", "Romanian Leu", "🇷🇴"),
    ("SEK", "Swedish Krona", "🇸🇪"),
    ("SGD", "Singapore Dollar", "🇸🇬"),
    ("THB", "Thai Baht", "🇹🇭"),
    ("TRY", "Turkish Lira", "🇹🇷"),
    ("USD", "US Dollar", "🇺🇸"),
    ("ZAR", "South African Rand", "🇿🇦"),
];

const PLACEHOLDER_FLAG: &str = "🏳️";

fn lookup(code: &str) -> Option<&'static (&'static str, &'static str, &'static str)> {
    CURRENCIES
        .binary_search_by_key(&code, |entry| entry.0)
        .ok()
        .map(|i| &CURRENCIES[i])
}

/// Display name for a currency code; unmapped codes echo the code itself.
pub fn name_for(code: &str) -> &str {
    lookup(code).map_or(code, |entry| entry.1)
}

/// Flag glyph for a currency code; unmapped codes get a placeholder.
pub fn flag_for(code: &str) -> &str {
    lookup(code).map_or(PLACEHOLDER_FLAG, |entry| entry.2)
}

/// The fixed set of codes seeding the currency set before any live sync.
pub fn baseline_codes() -> impl Iterator<Item = &'static str> {
    CURRENCIES.iter().map(|entry| entry.0)
}
