//! Total playback duration of an animated GIF, computed by walking the
//! container's block structure without touching pixel data.

/// Duration reported when the bytes are malformed, unrecognized, or carry no
/// timing information.
pub const FALLBACK_DURATION_MS: u32 = 3000;

/// Signature + logical screen descriptor. Anything shorter cannot be walked.
const MIN_PARSEABLE_LEN: usize = 13;

const EXTENSION: u8 = 0x21;
const GRAPHIC_CONTROL: u8 = 0xF9;
const IMAGE_DESCRIPTOR: u8 = 0x2C;
const TRAILER: u8 = 0x3B;

/// Compute the total playback duration of a GIF in milliseconds.
///
/// Sums the delay of every graphic-control extension in the stream. Never
/// fails outward: short input, a bad signature, a truncated block chain, or a
/// stream with no timing blocks all yield [`FALLBACK_DURATION_MS`]. The walk
/// stops at the first point it cannot safely advance and keeps whatever total
/// has accumulated by then.
pub fn gif_duration_ms(bytes: &[u8]) -> u32 {
    if bytes.len() < MIN_PARSEABLE_LEN {
        return FALLBACK_DURATION_MS;
    }
    if &bytes[..6] != b"GIF89a" && &bytes[..6] != b"GIF87a" {
        return FALLBACK_DURATION_MS;
    }

    let total = walk_blocks(bytes);
    if total > 0 {
        total
    } else {
        tracing::debug!("gif stream carried no usable timing, using fallback");
        FALLBACK_DURATION_MS
    }
}

fn walk_blocks(bytes: &[u8]) -> u32 {
    let mut pos = MIN_PARSEABLE_LEN;

    // Packed field of the logical screen descriptor: high bit flags a global
    // color table, low 3 bits give its size exponent.
    let lsd_packed = bytes[10];
    if lsd_packed & 0x80 != 0 {
        pos += color_table_len(lsd_packed);
    }

    let mut total: u32 = 0;
    while pos < bytes.len() {
        let block = bytes[pos];
        pos += 1;
        match block {
            EXTENSION => {
                let Some(&label) = bytes.get(pos) else { break };
                pos += 1;
                if label == GRAPHIC_CONTROL {
                    let Some(&size) = bytes.get(pos) else { break };
                    pos += 1;
                    if size == 4 {
                        // Block layout: packed, delay lo, delay hi, transparent
                        // index. Delay is little-endian centiseconds.
                        if let (Some(&lo), Some(&hi)) = (bytes.get(pos + 1), bytes.get(pos + 2)) {
                            let delay_cs = u16::from_le_bytes([lo, hi]);
                            total = total.saturating_add(u32::from(delay_cs) * 10);
                        }
                    }
                    pos += size as usize;
                }
                pos = skip_sub_blocks(bytes, pos);
            }
            IMAGE_DESCRIPTOR => {
                // Fixed position/size fields, then the packed descriptor.
                pos += 8;
                let Some(&packed) = bytes.get(pos) else { break };
                pos += 1;
                if packed & 0x80 != 0 {
                    pos += color_table_len(packed);
                }
                // LZW minimum code size, then the pixel data sub-block chain.
                pos += 1;
                pos = skip_sub_blocks(bytes, pos);
            }
            TRAILER => break,
            // Not a recognized block tag; stop rather than guess at offsets.
            _ => break,
        }
    }
    total
}

/// Byte length of a color table whose size bits are in `packed`.
fn color_table_len(packed: u8) -> usize {
    3 * (1usize << ((packed & 0x07) + 1))
}

/// Advance past a length-prefixed sub-block chain, including its zero-length
/// terminator. A chain truncated before the terminator ends the walk at the
/// buffer edge.
fn skip_sub_blocks(bytes: &[u8], mut pos: usize) -> usize {
    while let Some(&len) = bytes.get(pos) {
        if len == 0 {
            return pos + 1;
        }
        pos += len as usize + 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(lsd_packed: u8) -> Vec<u8> {
        let mut b = b"GIF89a".to_vec();
        b.extend_from_slice(&[1, 0, 1, 0, lsd_packed, 0, 0]);
        b
    }

    fn graphic_control(delay_cs: u16) -> [u8; 8] {
        let [lo, hi] = delay_cs.to_le_bytes();
        [0x21, 0xF9, 0x04, 0x00, lo, hi, 0x00, 0x00]
    }

    fn image_block() -> Vec<u8> {
        let mut b = vec![0x2C, 0, 0, 0, 0, 1, 0, 1, 0, 0x00];
        // LZW minimum code size, one 2-byte data sub-block, terminator.
        b.extend_from_slice(&[0x02, 0x02, 0x44, 0x01, 0x00]);
        b
    }

    #[test]
    fn single_graphic_control_delay_100_is_1000ms() {
        let mut gif = header(0x00);
        gif.extend_from_slice(&graphic_control(100));
        gif.push(0x3B);
        assert_eq!(gif_duration_ms(&gif), 1000);
    }

    #[test]
    fn delays_accumulate_across_frames() {
        let mut gif = header(0x00);
        for delay in [10u16, 25, 7] {
            gif.extend_from_slice(&graphic_control(delay));
            gif.extend_from_slice(&image_block());
        }
        gif.push(0x3B);
        assert_eq!(gif_duration_ms(&gif), 420);
    }

    #[test]
    fn gif87a_signature_is_accepted() {
        let mut gif = header(0x00);
        gif[..6].copy_from_slice(b"GIF87a");
        gif.extend_from_slice(&graphic_control(50));
        gif.push(0x3B);
        assert_eq!(gif_duration_ms(&gif), 500);
    }

    #[test]
    fn global_color_table_is_skipped() {
        // Size bits 0b001 -> 2^2 entries -> 12 bytes of table.
        let mut gif = header(0x81);
        gif.extend_from_slice(&[0u8; 12]);
        gif.extend_from_slice(&graphic_control(30));
        gif.push(0x3B);
        assert_eq!(gif_duration_ms(&gif), 300);
    }

    #[test]
    fn local_color_table_is_skipped() {
        let mut gif = header(0x00);
        gif.extend_from_slice(&graphic_control(12));
        // Image descriptor with a local color table (2^1 entries, 6 bytes).
        gif.extend_from_slice(&[0x2C, 0, 0, 0, 0, 1, 0, 1, 0, 0x80]);
        gif.extend_from_slice(&[0u8; 6]);
        gif.extend_from_slice(&[0x02, 0x01, 0x44, 0x00]);
        gif.extend_from_slice(&graphic_control(8));
        gif.push(0x3B);
        assert_eq!(gif_duration_ms(&gif), 200);
    }

    #[test]
    fn non_graphic_extensions_contribute_nothing() {
        let mut gif = header(0x00);
        // Application extension: label, 11-byte block, data sub-block, end.
        gif.extend_from_slice(&[0x21, 0xFF, 11]);
        gif.extend_from_slice(b"NETSCAPE2.0");
        gif.extend_from_slice(&[0x03, 0x01, 0x00, 0x00, 0x00]);
        gif.extend_from_slice(&graphic_control(40));
        gif.push(0x3B);
        assert_eq!(gif_duration_ms(&gif), 400);
    }

    #[test]
    fn short_input_falls_back() {
        assert_eq!(gif_duration_ms(&[]), FALLBACK_DURATION_MS);
        assert_eq!(gif_duration_ms(b"GIF89a"), FALLBACK_DURATION_MS);
        assert_eq!(gif_duration_ms(&[0u8; 12]), FALLBACK_DURATION_MS);
    }

    #[test]
    fn unrecognized_signature_falls_back() {
        let mut bytes = b"PNGPNG".to_vec();
        bytes.extend_from_slice(&[0u8; 20]);
        assert_eq!(gif_duration_ms(&bytes), FALLBACK_DURATION_MS);
    }

    #[test]
    fn no_timing_blocks_falls_back() {
        let mut gif = header(0x00);
        gif.extend_from_slice(&image_block());
        gif.push(0x3B);
        assert_eq!(gif_duration_ms(&gif), FALLBACK_DURATION_MS);
    }

    #[test]
    fn zero_delays_fall_back() {
        let mut gif = header(0x00);
        gif.extend_from_slice(&graphic_control(0));
        gif.push(0x3B);
        assert_eq!(gif_duration_ms(&gif), FALLBACK_DURATION_MS);
    }

    #[test]
    fn unknown_block_tag_stops_but_keeps_total() {
        let mut gif = header(0x00);
        gif.extend_from_slice(&graphic_control(60));
        gif.push(0x77);
        gif.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(gif_duration_ms(&gif), 600);
    }

    #[test]
    fn truncated_sub_block_chain_stays_in_bounds() {
        let mut gif = header(0x00);
        gif.extend_from_slice(&graphic_control(15));
        // Image data whose sub-block chain claims more bytes than remain.
        gif.extend_from_slice(&[0x2C, 0, 0, 0, 0, 1, 0, 1, 0, 0x00, 0x02, 0xFF]);
        assert_eq!(gif_duration_ms(&gif), 150);
    }

    #[test]
    fn truncated_graphic_control_keeps_prior_total() {
        let mut gif = header(0x00);
        gif.extend_from_slice(&graphic_control(20));
        // Second graphic control cut off right after its size byte.
        gif.extend_from_slice(&[0x21, 0xF9, 0x04]);
        assert_eq!(gif_duration_ms(&gif), 200);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let mut gif = header(0x00);
        gif.extend_from_slice(&graphic_control(33));
        gif.push(0x3B);
        assert_eq!(gif_duration_ms(&gif), gif_duration_ms(&gif));
    }
}
