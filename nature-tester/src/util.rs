use anyhow::{Result, bail};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn is_seed_token(token: &str) -> bool {
    regex::Regex::new(r"^(0[xX][0-9a-fA-F_]+|[0-9_]+)$")
        .map(|re| re.is_match(token))
        .unwrap_or(false)
}

/// Parse a comma-separated seed list. Seeds are decimal or `0x` hex and may
/// use `_` separators.
pub fn parse_seeds(s: &str) -> Result<Vec<u64>> {
    let mut seeds = Vec::new();
    for token in split_csv(s) {
        if !is_seed_token(&token) {
            bail!("invalid seed '{token}'");
        }
        let digits = token.replace('_', "");
        let parsed = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => digits.parse::<u64>(),
        };
        match parsed {
            Ok(seed) => seeds.push(seed),
            Err(err) => bail!("invalid seed '{token}': {err}"),
        }
    }
    if seeds.is_empty() {
        bail!("no seeds given");
    }
    Ok(seeds)
}
