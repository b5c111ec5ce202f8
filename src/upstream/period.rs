//! Time period translation for gainers/losers routes.

/// Map a client-facing period string to the code DexScreener expects.
///
/// Unknown periods fall back to `h24`, matching the behavior clients
/// already rely on for the default `1d` period.
pub fn to_upstream_period(period: &str) -> &'static str {
    match period {
        "1h" => "h1",
        "6h" => "h6",
        "24h" | "1d" => "h24",
        "7d" => "d7",
        "30d" => "d30",
        _ => "h24",
    }
}
