//! Reversible share codes for reproducible campaigns.
//! Code format: <START>-<WORD><NN>, e.g., DB-JUNK42, GN-LORCHA07

use crate::config::StartOption;

fn fnv1a64(bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;
    bytes.iter().fold(FNV_OFFSET, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME)
    })
}

fn sanitize_word(word: &str) -> String {
    word.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

pub const WORD_LIST: [&str; 48] = [
    "JUNK", "LORCHA", "SAMPAN", "CLIPPER", "TAIPAN", "HONG", "COMPRADR", "TYPHOON", "MONSOON",
    "JOSS", "TAEL", "SILK", "OPIUM", "ARMS", "CARGO", "GODOWN", "HARBOR", "WHARF", "ANCHOR",
    "RIGGING", "CANNON", "BROADSDE", "GALLEON", "CUTLASS", "PIRATE", "CORSAIR", "LIYUEN", "WU",
    "MCHENRY", "TINHAU", "KOWLOON", "VICTORIA", "PEAK", "LANTAU", "MACAU", "AMOY", "CANTON",
    "FORMOSA", "JAVA", "SUMATRA", "MALACCA", "LUZON", "CHOP", "LEDGER", "BULLION", "DRAGON",
    "PEARL", "JADE",
];

#[inline]
const fn pack(word_index: u16, nn: u8) -> u16 {
    (word_index & 0x01FF) | ((nn as u16 & 0x7F) << 9)
}

#[inline]
fn unpack(packed: u16) -> (u16, u8) {
    let nn = u8::try_from((packed >> 9) & 0x7F).unwrap_or(0);
    (packed & 0x01FF, nn)
}

const fn prefix(start: StartOption) -> &'static str {
    match start {
        StartOption::Debt => "DB",
        StartOption::Guns => "GN",
    }
}

fn compose_seed(start: StartOption, word_index: u16, nn: u8) -> u64 {
    let packed = pack(word_index, nn);
    let [lo, hi] = packed.to_le_bytes();
    let mut buf = [0u8; 11];
    buf[..7].copy_from_slice(b"TAIPAN-");
    buf[7] = match start {
        StartOption::Debt => b'D',
        StartOption::Guns => b'G',
    };
    buf[8] = lo;
    buf[9] = hi;
    buf[10] = 0x5A;
    let hash = fnv1a64(&buf);
    (hash & 0xFFFF_FFFF_FFFF_0000) | u64::from(packed)
}

/// Render the share code for a seed produced by [`decode_to_seed`] or
/// [`generate_code_from_entropy`].
#[must_use]
pub fn encode_friendly(start: StartOption, seed: u64) -> String {
    let packed = u16::try_from(seed & 0xFFFF).unwrap_or(0);
    let (word_index, nn) = unpack(packed);
    let word = WORD_LIST
        .get(usize::from(word_index))
        .copied()
        .unwrap_or(WORD_LIST[0]);
    format!("{}-{word}{:02}", prefix(start), nn % 100)
}

/// Parse `DB-JUNK42` style codes into a start option and a seed.
#[must_use]
pub fn decode_to_seed(code: &str) -> Option<(StartOption, u64)> {
    let (start_part, rest) = code.trim().split_once('-')?;
    let start = match start_part.to_ascii_uppercase().as_str() {
        "DB" => StartOption::Debt,
        "GN" => StartOption::Guns,
        _ => return None,
    };
    if rest.len() < 3 || !rest.is_char_boundary(rest.len() - 2) {
        return None;
    }
    let (word_part, nn_part) = rest.split_at(rest.len() - 2);
    let nn: u8 = nn_part.parse().ok()?;
    let word = sanitize_word(word_part);
    let index = WORD_LIST.iter().position(|w| sanitize_word(w) == word)?;
    let word_index = u16::try_from(index).ok()?;
    Some((start, compose_seed(start, word_index, nn)))
}

#[must_use]
pub fn generate_code_from_entropy(start: StartOption, entropy: u64) -> String {
    let word_count = WORD_LIST.len() as u64;
    let word_index = u16::try_from(entropy % word_count).unwrap_or(0);
    let nn = u8::try_from((entropy >> 17) % 100).unwrap_or(0);
    encode_friendly(start, compose_seed(start, word_index, nn))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_roundtrip_through_seeds() {
        let (start, seed) = decode_to_seed("GN-LORCHA07").unwrap();
        assert_eq!(start, StartOption::Guns);
        assert_eq!(encode_friendly(start, seed), "GN-LORCHA07");
    }

    #[test]
    fn decoding_is_case_insensitive_and_stable() {
        let (_, a) = decode_to_seed("db-junk42").unwrap();
        let (_, b) = decode_to_seed("DB-JUNK42").unwrap();
        assert_eq!(a, b);
        let (_, other_start) = decode_to_seed("GN-JUNK42").unwrap();
        assert_ne!(a, other_start);
    }

    #[test]
    fn malformed_codes_are_rejected() {
        for code in ["JUNK42", "XX-JUNK42", "DB-JU", "DB-NOTAWORD12", "DB-JUNKAB"] {
            assert!(decode_to_seed(code).is_none(), "{code}");
        }
    }

    #[test]
    fn entropy_codes_decode() {
        let code = generate_code_from_entropy(StartOption::Debt, 0xFEED_F00D);
        let (start, seed) = decode_to_seed(&code).unwrap();
        assert_eq!(start, StartOption::Debt);
        assert_eq!(encode_friendly(start, seed), code);
    }
}
