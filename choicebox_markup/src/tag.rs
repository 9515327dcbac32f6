// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline tag parser.
//!
//! ## Grammar
//!
//! Two tags are recognized, each introduced by a backslash, a case-sensitive
//! tag letter, and an opening bracket:
//!
//! - `\S[body]` sets the letter size.
//!   - empty body resets to [`TagContext::default_size`];
//!   - `+N` / `-N` adjusts [`TagContext::current_size`], clamped to `>= 0`;
//!   - anything else is an absolute size, clamped to `>= 0`.
//! - `\C[body]` sets the text color.
//!   - empty body is [`TagContext::default_color`];
//!   - `#rgb` doubles each nibble, `#rrggbb` is taken as-is;
//!   - otherwise at least three comma-separated components, each clamped to `0..=255`.
//!
//! Numbers parse with a leading-prefix rule (`"12px"` is `12`). A fragment with
//! no leading digits takes the default for that slot.
//!
//! A tag is **not** recognized (and the probed position is returned unchanged) when
//! the prefix differs, the closing `]` is missing, or a color list has fewer than
//! three components. The escaped backslash `\\` is handled by the caller before
//! the parser is consulted.

use alloc::vec::Vec;

use crate::types::{ParsedTag, Rgb, TagContext, TextTag};

const SIZE_CODE: char = 'S';
const COLOR_CODE: char = 'C';

/// Try to parse a tag starting at `head`.
///
/// `text` is indexed by character so that wide characters count as one unit.
///
/// ```
/// use choicebox_markup::{parse_tag, TagContext, TextTag};
///
/// let text: Vec<char> = "a\\S[+4]b".chars().collect();
/// let parsed = parse_tag(&text, 1, &TagContext::new(10));
/// assert_eq!(parsed.tag, Some(TextTag::Size(14)));
/// assert_eq!(parsed.next_head, 7);
///
/// // Not a tag: the head comes back unchanged.
/// assert_eq!(parse_tag(&text, 0, &TagContext::new(10)).next_head, 0);
/// ```
pub fn parse_tag(text: &[char], head: usize, ctx: &TagContext) -> ParsedTag {
    let Some(code) = tag_code(text, head) else {
        return ParsedTag::none(head);
    };
    let body_start = head + 3;
    let Some(close) = text[body_start..].iter().position(|&c| c == ']') else {
        log::trace!("unterminated tag at {head}");
        return ParsedTag::none(head);
    };
    let body = &text[body_start..body_start + close];
    let tag = match code {
        SIZE_CODE => Some(TextTag::Size(parse_size(body, ctx))),
        COLOR_CODE => parse_color(body, ctx).map(TextTag::Color),
        _ => None,
    };
    match tag {
        Some(tag) => ParsedTag {
            next_head: body_start + close + 1,
            tag: Some(tag),
        },
        None => {
            log::trace!("rejected tag body at {head}");
            ParsedTag::none(head)
        }
    }
}

fn tag_code(text: &[char], head: usize) -> Option<char> {
    match text.get(head..head + 3)? {
        ['\\', code @ (SIZE_CODE | COLOR_CODE), '['] => Some(*code),
        _ => None,
    }
}

fn parse_size(body: &[char], ctx: &TagContext) -> i32 {
    let size = match body {
        [] => ctx.default_size,
        ['+', rest @ ..] => ctx.current_size.saturating_add(parse_int(rest, 0)),
        ['-', rest @ ..] => ctx.current_size.saturating_sub(parse_int(rest, 0)),
        _ => parse_int(body, ctx.default_size),
    };
    size.max(0)
}

fn parse_color(body: &[char], ctx: &TagContext) -> Option<Rgb> {
    match body {
        [] => Some(ctx.default_color),
        ['#', hex @ ..] => Some(parse_hex_color(hex).unwrap_or(ctx.default_color)),
        _ => {
            let parts: Vec<&[char]> = body.split(|&c| c == ',').collect();
            if parts.len() < 3 {
                return None;
            }
            Some(Rgb::new(
                channel(parts[0]),
                channel(parts[1]),
                channel(parts[2]),
            ))
        }
    }
}

fn parse_hex_color(hex: &[char]) -> Option<Rgb> {
    // Nibble arithmetic works on the parsed prefix, matching the decimal rule.
    let v = parse_hex_prefix(hex)?;
    let nibble = |shift: u32| u8::try_from((v >> shift) & 0x0f).unwrap_or(0) * 0x11;
    let byte = |shift: u32| u8::try_from((v >> shift) & 0xff).unwrap_or(0);
    match hex.len() {
        3 => Some(Rgb::new(nibble(8), nibble(4), nibble(0))),
        6 => Some(Rgb::new(byte(16), byte(8), byte(0))),
        _ => None,
    }
}

fn channel(part: &[char]) -> u8 {
    u8::try_from(parse_int(part, 255).clamp(0, 255)).unwrap_or(u8::MAX)
}

/// Parse a leading decimal integer, returning `default` when there are no digits.
///
/// Leading whitespace and a single sign are accepted; trailing garbage is ignored.
pub(crate) fn parse_int(text: &[char], default: i32) -> i32 {
    let mut chars = text.iter().copied().skip_while(|c| c.is_whitespace()).peekable();
    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };
    let mut value: i64 = 0;
    let mut any = false;
    for c in chars {
        let Some(d) = c.to_digit(10) else { break };
        any = true;
        value = (value * 10 + i64::from(d)).min(i64::from(i32::MAX) + 1);
    }
    if !any {
        return default;
    }
    let value = if negative { -value } else { value };
    i32::try_from(value).unwrap_or(if negative { i32::MIN } else { i32::MAX })
}

fn parse_hex_prefix(text: &[char]) -> Option<u32> {
    let mut value: u32 = 0;
    let mut any = false;
    for c in text {
        let Some(d) = c.to_digit(16) else { break };
        any = true;
        value = value.wrapping_shl(4) | d;
    }
    any.then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn tag_at(s: &str, head: usize, ctx: TagContext) -> ParsedTag {
        parse_tag(&chars(s), head, &ctx)
    }

    #[test]
    fn size_absolute_relative_and_reset() {
        let mut ctx = TagContext::new(10);
        assert_eq!(tag_at("\\S[24]", 0, ctx).tag, Some(TextTag::Size(24)));
        assert_eq!(tag_at("\\S[+4]", 0, ctx).tag, Some(TextTag::Size(14)));
        assert_eq!(tag_at("\\S[-4]", 0, ctx).tag, Some(TextTag::Size(6)));
        ctx.current_size = 31;
        assert_eq!(tag_at("\\S[]", 0, ctx).tag, Some(TextTag::Size(10)));
    }

    #[test]
    fn size_clamps_to_zero() {
        let ctx = TagContext::new(10);
        assert_eq!(tag_at("\\S[-40]", 0, ctx).tag, Some(TextTag::Size(0)));
        assert_eq!(tag_at("\\S[-3x]", 0, ctx).tag, Some(TextTag::Size(7)));
    }

    #[test]
    fn size_garbage_uses_defaults() {
        let mut ctx = TagContext::new(10);
        ctx.current_size = 20;
        // Absolute: default letter height.
        assert_eq!(tag_at("\\S[big]", 0, ctx).tag, Some(TextTag::Size(10)));
        // Relative: adjustment of zero.
        assert_eq!(tag_at("\\S[+abc]", 0, ctx).tag, Some(TextTag::Size(20)));
        // Leading digits win.
        assert_eq!(tag_at("\\S[12px]", 0, ctx).tag, Some(TextTag::Size(12)));
    }

    #[test]
    fn reset_after_relative_sequence() {
        let ctx = TagContext::new(10);
        let mut current = ctx;
        for body in ["\\S[+3]", "\\S[+9]", "\\S[-2]", "\\S[-50]", "\\S[+1]"] {
            let Some(TextTag::Size(s)) = tag_at(body, 0, current).tag else {
                panic!("size tag expected for {body}");
            };
            current.current_size = s;
        }
        assert_eq!(tag_at("\\S[]", 0, current).tag, Some(TextTag::Size(10)));
    }

    #[test]
    fn white_spellings_agree() {
        let ctx = TagContext::new(10);
        let white = Some(TextTag::Color(Rgb::WHITE));
        assert_eq!(tag_at("\\C[#fff]", 0, ctx).tag, white);
        assert_eq!(tag_at("\\C[255,255,255]", 0, ctx).tag, white);
        assert_eq!(tag_at("\\C[]", 0, ctx).tag, white);
        assert_eq!(tag_at("\\C[#ffffff]", 0, ctx).tag, white);
    }

    #[test]
    fn short_hex_doubles_nibbles() {
        let ctx = TagContext::new(10);
        assert_eq!(
            tag_at("\\C[#f0a]", 0, ctx).tag,
            Some(TextTag::Color(Rgb::new(255, 0, 170)))
        );
        assert_eq!(
            tag_at("\\C[#12ab34]", 0, ctx).tag,
            Some(TextTag::Color(Rgb::new(0x12, 0xab, 0x34)))
        );
    }

    #[test]
    fn hex_with_wrong_length_is_default_color() {
        let ctx = TagContext::new(10);
        assert_eq!(
            tag_at("\\C[#abcd]", 0, ctx).tag,
            Some(TextTag::Color(Rgb::WHITE))
        );
    }

    #[test]
    fn component_list_clamps_and_defaults() {
        let ctx = TagContext::new(10);
        assert_eq!(
            tag_at("\\C[300,-5,x]", 0, ctx).tag,
            Some(TextTag::Color(Rgb::new(255, 0, 255)))
        );
        assert_eq!(
            tag_at("\\C[1, 2, 3, 4]", 0, ctx).tag,
            Some(TextTag::Color(Rgb::new(1, 2, 3)))
        );
    }

    #[test]
    fn unrecognized_returns_head_unchanged() {
        let ctx = TagContext::new(10);
        for (text, head) in [
            ("\\C[1,2]", 0),
            ("\\S[12", 0),
            ("\\s[12]", 0),
            ("\\X[1]", 0),
            ("ab\\S", 2),
            ("plain", 1),
        ] {
            let parsed = tag_at(text, head, ctx);
            assert_eq!(parsed.tag, None, "{text}");
            assert_eq!(parsed.next_head, head, "{text}");
        }
    }

    #[test]
    fn recognized_advances_past_bracket() {
        let ctx = TagContext::new(10);
        for (text, head) in [("x\\S[3]y", 1), ("\\C[]", 0), ("ab\\C[#000]", 2)] {
            let parsed = tag_at(text, head, ctx);
            assert!(parsed.tag.is_some(), "{text}");
            assert!(parsed.next_head > head, "{text}");
            assert_eq!(chars(text)[parsed.next_head - 1], ']', "{text}");
        }
    }

    #[test]
    fn wide_characters_count_once() {
        let ctx = TagContext::new(10);
        let parsed = tag_at("選\\S[+2]択", 1, ctx);
        assert_eq!(parsed.tag, Some(TextTag::Size(12)));
        assert_eq!(parsed.next_head, 7);
    }

    #[test]
    fn int_prefix_rules() {
        assert_eq!(parse_int(&chars("  42"), 0), 42);
        assert_eq!(parse_int(&chars("-7z"), 0), -7);
        assert_eq!(parse_int(&chars("+"), 5), 5);
        assert_eq!(parse_int(&chars(""), 9), 9);
        assert_eq!(parse_int(&chars("99999999999"), 0), i32::MAX);
    }
}
