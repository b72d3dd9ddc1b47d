//! The identifier algorithms: MusicBrainz disc ID, freedb disc ID, and the
//! submission URL

use crate::toc::Toc;
use crate::{DiscIdError, DiscIdResult, SECTORS_PER_SECOND};
use base64::Engine;
use regex::Regex;
use sha1::{Digest, Sha1};
use std::fmt::Write;
use std::sync::OnceLock;

const BASE64_ENCODER: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Number of sector values hashed into the disc ID: the leadout plus one slot
/// per possible track number.
const ID_SLOTS: usize = 100;

/// Base URL of the interactive disc submission wizard.
const SUBMISSION_URL: &str = "http://musicbrainz.org/cdtoc/attach";

/// Compute the MusicBrainz disc ID for a TOC. Always 28 characters.
///
/// The digest input is the uppercase-hex ASCII rendering of the first and
/// last track numbers (2 chars each) followed by 100 sector values (8 chars
/// each): slot 0 holds the leadout and slot `k` the start offset of track
/// `k`, zero where the disc has no such track. The SHA-1 digest of that text
/// is rendered with [`encode_digest`]. The layout is fixed by the reference
/// implementation and must not change.
#[must_use]
pub fn disc_id(toc: &Toc) -> String {
    let mut message = String::with_capacity(2 + 2 + 8 * ID_SLOTS);

    let _ = write!(message, "{:02X}{:02X}", toc.first_track(), toc.last_track());
    for slot in id_slots(toc) {
        let _ = write!(message, "{slot:08X}");
    }

    let mut hasher = Sha1::new();
    hasher.update(message.as_bytes());

    encode_digest(&hasher.finalize())
}

/// Arrange a TOC into the fixed 100-slot layout hashed by [`disc_id`].
fn id_slots(toc: &Toc) -> [u32; ID_SLOTS] {
    let mut slots = [0; ID_SLOTS];

    slots[0] = toc.leadout();
    for (i, &offset) in toc.offsets().iter().enumerate() {
        slots[usize::from(toc.first_track()) + i] = offset;
    }

    slots
}

/// Render a digest in the disc ID base64 variant: the standard alphabet with
/// `+` -> `.`, `/` -> `_`, and the `=` padding -> `-`, keeping the ID safe in
/// URLs and filesystems.
fn encode_digest(digest: &[u8]) -> String {
    BASE64_ENCODER
        .encode(digest)
        .chars()
        .map(|c| match c {
            '+' => '.',
            '/' => '_',
            '=' => '-',
            other => other,
        })
        .collect()
}

/// Compute the freedb disc ID for a TOC: 8 lowercase hex digits packing a
/// digit-sum checksum of the track start times (high byte), the total play
/// time in seconds (middle two bytes), and the track count (low byte).
#[must_use]
pub fn freedb_id(toc: &Toc) -> String {
    let offsets = toc.offsets();

    let checksum =
        offsets.iter().map(|&offset| digit_sum(offset / SECTORS_PER_SECOND)).sum::<u32>() % 255;

    // Play time excludes the gap before the first track
    let total_seconds = toc.leadout() / SECTORS_PER_SECOND - offsets[0] / SECTORS_PER_SECOND;
    let track_count = offsets.len() as u32;

    format!("{:08x}", (checksum << 24) | (total_seconds << 8) | track_count)
}

/// Sum of the decimal digits of `n`.
fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Build the URL of the disc submission wizard for a TOC.
///
/// Embeds the disc ID, the track count, and the TOC string with `+` standing
/// in for spaces. For display and submission only; identity comparisons go
/// through [`disc_id`].
#[must_use]
pub fn submission_url(toc: &Toc) -> String {
    let toc_param = toc.to_string().replace(' ', "+");
    format!(
        "{SUBMISSION_URL}?id={}&tracks={}&toc={toc_param}",
        disc_id(toc),
        toc.offsets().len()
    )
}

/// Recover a TOC string from a previously built submission URL.
///
/// Compatibility path for callers that kept only the URL: pulls the `toc`
/// query parameter and turns its `+` separators back into spaces. The result
/// still goes through the normal TOC string parser.
///
/// # Errors
///
/// Returns [`DiscIdError::MalformedToc`] if the URL carries no `toc` query
/// parameter.
pub fn toc_string_from_url(url: &str) -> DiscIdResult<String> {
    static RE: OnceLock<Regex> = OnceLock::new();

    let re = RE.get_or_init(|| Regex::new(r"[?&]toc=([0-9+]+)").unwrap());
    let captures = re.captures(url).ok_or_else(|| {
        DiscIdError::MalformedToc(format!("no toc query parameter in URL '{url}'"))
    })?;

    Ok(captures.get(1).unwrap().as_str().replace('+', " "))
}
