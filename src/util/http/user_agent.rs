use rand::Rng;

const CHROME_VERSIONS: [&str; 12] = [
    "133.0.6943.88",
    "132.0.6834.110",
    "131.0.6778.108",
    "130.0.6723.117",
    "129.0.6668.89",
    "128.0.6613.138",
    "127.0.6533.119",
    "126.0.6478.182",
    "125.0.6422.176",
    "124.0.6367.243",
    "123.0.6312.122",
    "122.0.6261.129",
];

const FIREFOX_VERSIONS: [&str; 10] = [
    "133.0", "132.0", "131.0", "130.0", "129.0", "128.0", "127.0", "126.0", "125.0", "124.0",
];

const PLATFORMS: [&str; 4] = [
    "X11; Linux x86_64",
    "Windows NT 10.0; Win64; x64",
    "Macintosh; Intel Mac OS X 10_15_7",
    "X11; Ubuntu; Linux x86_64",
];

/// Generates a random browser-like User-Agent string.
///
/// The quote source blocks or degrades responses for default HTTP client
/// identifiers, so each process run picks a plausible desktop browser.
pub fn gen_random_ua() -> String {
    let mut rng = rand::rng();
    let platform = PLATFORMS[rng.random_range(0..PLATFORMS.len())];

    if rng.random_bool(0.7) {
        let version = CHROME_VERSIONS[rng.random_range(0..CHROME_VERSIONS.len())];
        format!(
            "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{} Safari/537.36",
            platform, version
        )
    } else {
        let version = FIREFOX_VERSIONS[rng.random_range(0..FIREFOX_VERSIONS.len())];
        format!(
            "Mozilla/5.0 ({}; rv:{}) Gecko/20100101 Firefox/{}",
            platform, version, version
        )
    }
}
