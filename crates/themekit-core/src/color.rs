//! CSS color recognition and standardization.
//!
//! Accepted forms: `rgb()`, `rgba()`, `hsl()`, `hsla()`, `#hex` with 3, 4, 6
//! or 8 digits, and lowercase CSS named colors. Standardized output is the
//! comma-separated RGB triple (`"70, 171, 225"`) with alpha dropped.

use std::sync::LazyLock;

use regex::Regex;

static RGB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(rgba?)\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*(\d*\.?\d+)\s*)?\)$",
    )
    .expect("rgb pattern is valid")
});

static HSL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(hsla?)\(\s*(\d{1,3}(?:\.\d+)?)\s*,\s*(\d{1,3}(?:\.\d+)?)%\s*,\s*(\d{1,3}(?:\.\d+)?)%\s*(?:,\s*(\d*\.?\d+)\s*)?\)$",
    )
    .expect("hsl pattern is valid")
});

/// An sRGB color with 8-bit channels. Alpha is parsed for validation only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

impl Rgb {
    const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// `"r, g, b"`.
    #[must_use]
    pub fn standardized(&self) -> String {
        format!("{}, {}, {}", self.r, self.g, self.b)
    }
}

/// Whether `s` is any accepted color form.
#[must_use]
pub fn is_color(s: &str) -> bool {
    parse(s).is_some()
}

#[must_use]
pub fn is_rgb(s: &str) -> bool {
    parse_rgb(s).is_some()
}

#[must_use]
pub fn is_hsl(s: &str) -> bool {
    parse_hsl(s).is_some()
}

#[must_use]
pub fn is_hex(s: &str) -> bool {
    parse_hex(s).is_some()
}

#[must_use]
pub fn is_color_name(s: &str) -> bool {
    named(s).is_some()
}

/// Parse any accepted color form.
#[must_use]
pub fn parse(s: &str) -> Option<Rgb> {
    parse_rgb(s)
        .or_else(|| parse_hsl(s))
        .or_else(|| parse_hex(s))
        .or_else(|| named(s))
}

/// Convert an accepted color to `"r, g, b"`.
#[must_use]
pub fn standardize(s: &str) -> Option<String> {
    parse(s).map(|rgb| rgb.standardized())
}

fn parse_alpha(function: &str, alpha: Option<&str>) -> Option<f64> {
    match (function.ends_with('a'), alpha) {
        (true, Some(a)) => a.parse::<f64>().ok().filter(|a| (0.0..=1.0).contains(a)),
        (false, None) => Some(1.0),
        _ => None,
    }
}

fn parse_rgb(s: &str) -> Option<Rgb> {
    let caps = RGB.captures(s)?;
    let channel = |i: usize| caps.get(i)?.as_str().parse::<u8>().ok();
    let alpha = parse_alpha(&caps[1], caps.get(5).map(|m| m.as_str()))?;
    Some(Rgb {
        r: channel(2)?,
        g: channel(3)?,
        b: channel(4)?,
        alpha,
    })
}

fn parse_hsl(s: &str) -> Option<Rgb> {
    let caps = HSL.captures(s)?;
    let number = |i: usize| caps.get(i)?.as_str().parse::<f64>().ok();
    let h = number(2).filter(|h| *h <= 360.0)?;
    let sat = number(3).filter(|v| *v <= 100.0)?;
    let light = number(4).filter(|v| *v <= 100.0)?;
    let alpha = parse_alpha(&caps[1], caps.get(5).map(|m| m.as_str()))?;
    let (r, g, b) = hsl_to_rgb(h, sat / 100.0, light / 100.0);
    Some(Rgb { r, g, b, alpha })
}

// Standard HSL -> RGB conversion with normalized saturation/lightness.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return (q - p).mul_add(6.0 * t, p);
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return (q - p).mul_add((2.0 / 3.0 - t) * 6.0, p);
        }
        p
    }

    let h = (h % 360.0) / 360.0;
    if s == 0.0 {
        let v = to_u8(l);
        return (v, v, v);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l.mul_add(-s, l + s) };
    let p = 2.0f64.mul_add(l, -q);
    (
        to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_u8(hue_to_rgb(p, q, h)),
        to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // clamp keeps the cast in range
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn parse_hex(s: &str) -> Option<Rgb> {
    let hex = s.strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|n| n << 4 | n);

    match hex.len() {
        3 => Some(Rgb::opaque(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgb {
            alpha: f64::from(nibble(3)?) / 255.0,
            ..Rgb::opaque(nibble(0)?, nibble(1)?, nibble(2)?)
        }),
        6 => Some(Rgb::opaque(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgb {
            alpha: f64::from(byte(6)?) / 255.0,
            ..Rgb::opaque(byte(0)?, byte(2)?, byte(4)?)
        }),
        _ => None,
    }
}

fn named(s: &str) -> Option<Rgb> {
    if s == "transparent" {
        return Some(Rgb {
            alpha: 0.0,
            ..Rgb::opaque(0, 0, 0)
        });
    }
    NAMED_COLORS
        .binary_search_by(|(name, _)| name.cmp(&s))
        .ok()
        .map(|i| {
            let [r, g, b] = NAMED_COLORS[i].1;
            Rgb::opaque(r, g, b)
        })
}

// Sorted by name for binary search.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("aliceblue", [240, 248, 255]),
    ("antiquewhite", [250, 235, 215]),
    ("aqua", [0, 255, 255]),
    ("aquamarine", [127, 255, 212]),
    ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]),
    ("bisque", [255, 228, 196]),
    ("black", [0, 0, 0]),
    ("blanchedalmond", [255, 235, 205]),
    ("blue", [0, 0, 255]),
    ("blueviolet", [138, 43, 226]),
    ("brown", [165, 42, 42]),
    ("burlywood", [222, 184, 135]),
    ("cadetblue", [95, 158, 160]),
    ("chartreuse", [127, 255, 0]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("cornsilk", [255, 248, 220]),
    ("crimson", [220, 20, 60]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkcyan", [0, 139, 139]),
    ("darkgoldenrod", [184, 134, 11]),
    ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkgrey", [169, 169, 169]),
    ("darkkhaki", [189, 183, 107]),
    ("darkmagenta", [139, 0, 139]),
    ("darkolivegreen", [85, 107, 47]),
    ("darkorange", [255, 140, 0]),
    ("darkorchid", [153, 50, 204]),
    ("darkred", [139, 0, 0]),
    ("darksalmon", [233, 150, 122]),
    ("darkseagreen", [143, 188, 143]),
    ("darkslateblue", [72, 61, 139]),
    ("darkslategray", [47, 79, 79]),
    ("darkslategrey", [47, 79, 79]),
    ("darkturquoise", [0, 206, 209]),
    ("darkviolet", [148, 0, 211]),
    ("deeppink", [255, 20, 147]),
    ("deepskyblue", [0, 191, 255]),
    ("dimgray", [105, 105, 105]),
    ("dimgrey", [105, 105, 105]),
    ("dodgerblue", [30, 144, 255]),
    ("firebrick", [178, 34, 34]),
    ("floralwhite", [255, 250, 240]),
    ("forestgreen", [34, 139, 34]),
    ("fuchsia", [255, 0, 255]),
    ("gainsboro", [220, 220, 220]),
    ("ghostwhite", [248, 248, 255]),
    ("gold", [255, 215, 0]),
    ("goldenrod", [218, 165, 32]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("greenyellow", [173, 255, 47]),
    ("grey", [128, 128, 128]),
    ("honeydew", [240, 255, 240]),
    ("hotpink", [255, 105, 180]),
    ("indianred", [205, 92, 92]),
    ("indigo", [75, 0, 130]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lavenderblush", [255, 240, 245]),
    ("lawngreen", [124, 252, 0]),
    ("lemonchiffon", [255, 250, 205]),
    ("lightblue", [173, 216, 230]),
    ("lightcoral", [240, 128, 128]),
    ("lightcyan", [224, 255, 255]),
    ("lightgoldenrodyellow", [250, 250, 210]),
    ("lightgray", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]),
    ("lightgrey", [211, 211, 211]),
    ("lightpink", [255, 182, 193]),
    ("lightsalmon", [255, 160, 122]),
    ("lightseagreen", [32, 178, 170]),
    ("lightskyblue", [135, 206, 250]),
    ("lightslategray", [119, 136, 153]),
    ("lightslategrey", [119, 136, 153]),
    ("lightsteelblue", [176, 196, 222]),
    ("lightyellow", [255, 255, 224]),
    ("lime", [0, 255, 0]),
    ("limegreen", [50, 205, 50]),
    ("linen", [250, 240, 230]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("mediumaquamarine", [102, 205, 170]),
    ("mediumblue", [0, 0, 205]),
    ("mediumorchid", [186, 85, 211]),
    ("mediumpurple", [147, 112, 219]),
    ("mediumseagreen", [60, 179, 113]),
    ("mediumslateblue", [123, 104, 238]),
    ("mediumspringgreen", [0, 250, 154]),
    ("mediumturquoise", [72, 209, 204]),
    ("mediumvioletred", [199, 21, 133]),
    ("midnightblue", [25, 25, 112]),
    ("mintcream", [245, 255, 250]),
    ("mistyrose", [255, 228, 225]),
    ("moccasin", [255, 228, 181]),
    ("navajowhite", [255, 222, 173]),
    ("navy", [0, 0, 128]),
    ("oldlace", [253, 245, 230]),
    ("olive", [128, 128, 0]),
    ("olivedrab", [107, 142, 35]),
    ("orange", [255, 165, 0]),
    ("orangered", [255, 69, 0]),
    ("orchid", [218, 112, 214]),
    ("palegoldenrod", [238, 232, 170]),
    ("palegreen", [152, 251, 152]),
    ("paleturquoise", [175, 238, 238]),
    ("palevioletred", [219, 112, 147]),
    ("papayawhip", [255, 239, 213]),
    ("peachpuff", [255, 218, 185]),
    ("peru", [205, 133, 63]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("powderblue", [176, 224, 230]),
    ("purple", [128, 0, 128]),
    ("rebeccapurple", [102, 51, 153]),
    ("red", [255, 0, 0]),
    ("rosybrown", [188, 143, 143]),
    ("royalblue", [65, 105, 225]),
    ("saddlebrown", [139, 69, 19]),
    ("salmon", [250, 128, 114]),
    ("sandybrown", [244, 164, 96]),
    ("seagreen", [46, 139, 87]),
    ("seashell", [255, 245, 238]),
    ("sienna", [160, 82, 45]),
    ("silver", [192, 192, 192]),
    ("skyblue", [135, 206, 235]),
    ("slateblue", [106, 90, 205]),
    ("slategray", [112, 128, 144]),
    ("slategrey", [112, 128, 144]),
    ("snow", [255, 250, 250]),
    ("springgreen", [0, 255, 127]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("teal", [0, 128, 128]),
    ("thistle", [216, 191, 216]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("wheat", [245, 222, 179]),
    ("white", [255, 255, 255]),
    ("whitesmoke", [245, 245, 245]),
    ("yellow", [255, 255, 0]),
    ("yellowgreen", [154, 205, 50]),
];
