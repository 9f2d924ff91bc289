use anyhow::{Result, bail};
use std::collections::HashSet;
use taipan_game::{StartOption, decode_to_seed, encode_friendly};

/// One campaign to play: the session seed and how it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedInfo {
    pub seed: u64,
    pub start: StartOption,
    pub code: Option<String>,
}

impl SeedInfo {
    #[must_use]
    pub const fn from_numeric(seed: u64, start: StartOption) -> Self {
        Self {
            seed,
            start,
            code: None,
        }
    }

    #[must_use]
    pub const fn from_share_code(seed: u64, start: StartOption, code: String) -> Self {
        Self {
            seed,
            start,
            code: Some(code),
        }
    }

    /// The share code this campaign was given, or the canonical one for its seed.
    #[must_use]
    pub fn share_code(&self) -> String {
        self.code
            .clone()
            .unwrap_or_else(|| encode_friendly(self.start, self.seed))
    }
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Resolve CLI seed tokens. Integers open with `default_start`; share codes
/// such as `GN-LORCHA07` carry their own start option.
pub fn resolve_seed_inputs(tokens: &[String], default_start: StartOption) -> Result<Vec<SeedInfo>> {
    let mut resolved = Vec::new();
    let mut seen = HashSet::new();

    for token in tokens {
        let info = if let Ok(value) = token.parse::<i64>() {
            SeedInfo::from_numeric(value.unsigned_abs(), default_start)
        } else if let Ok(value) = token.parse::<u64>() {
            SeedInfo::from_numeric(value, default_start)
        } else if let Some((start, seed)) = decode_to_seed(token) {
            SeedInfo::from_share_code(seed, start, token.trim().to_uppercase())
        } else {
            bail!("Unrecognized seed token: {token}");
        };

        if seen.insert((info.seed, info.start)) {
            resolved.push(info);
        }
    }

    if resolved.is_empty() {
        resolved.push(SeedInfo::from_numeric(1860, default_start));
    }

    Ok(resolved)
}
