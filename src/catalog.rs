use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual style used to steer prompt rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Style {
    #[default]
    #[serde(rename = "None")]
    None,
    #[serde(rename = "Realistic")]
    Realistic,
    #[serde(rename = "Cartoon")]
    Cartoon,
    #[serde(rename = "Fantasy")]
    Fantasy,
    #[serde(rename = "Artistic")]
    Artistic,
    #[serde(rename = "3D Render")]
    ThreeD,
    #[serde(rename = "Cinematic")]
    Cinematic,
    #[serde(rename = "Anime")]
    Anime,
    #[serde(rename = "Oil Painting")]
    OilPainting,
}

impl Style {
    pub const ALL: [Style; 9] = [
        Style::None,
        Style::Realistic,
        Style::Cartoon,
        Style::Fantasy,
        Style::Artistic,
        Style::ThreeD,
        Style::Cinematic,
        Style::Anime,
        Style::OilPainting,
    ];

    /// Tag inserted into prompts, e.g. "3D Render".
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::None => "None",
            Style::Realistic => "Realistic",
            Style::Cartoon => "Cartoon",
            Style::Fantasy => "Fantasy",
            Style::Artistic => "Artistic",
            Style::ThreeD => "3D Render",
            Style::Cinematic => "Cinematic",
            Style::Anime => "Anime",
            Style::OilPainting => "Oil Painting",
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Style::None => "None",
            Style::Realistic => "Realistic",
            Style::Cartoon => "Cartoon",
            Style::Fantasy => "Fantasy",
            Style::Artistic => "Artistic",
            Style::ThreeD => "ThreeD",
            Style::Cinematic => "Cinematic",
            Style::Anime => "Anime",
            Style::OilPainting => "OilPainting",
        }
    }

    pub fn option(&self) -> &'static StyleOption {
        // STYLE_OPTIONS is declared in the same order as Style::ALL
        &STYLE_OPTIONS[*self as usize]
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Style::ALL
            .into_iter()
            .find(|style| {
                style.as_str().eq_ignore_ascii_case(needle)
                    || style.variant_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| format!("Unknown style: {}", s))
    }
}

/// Output aspect ratio, passed through to the image model unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait3x4,
    #[serde(rename = "9:16")]
    Portrait9x16,
    #[serde(rename = "4:3")]
    Landscape4x3,
    #[serde(rename = "16:9")]
    Landscape16x9,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Portrait3x4,
        AspectRatio::Portrait9x16,
        AspectRatio::Landscape4x3,
        AspectRatio::Landscape16x9,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait3x4 => "3:4",
            AspectRatio::Portrait9x16 => "9:16",
            AspectRatio::Landscape4x3 => "4:3",
            AspectRatio::Landscape16x9 => "16:9",
        }
    }

    /// Pixel size for backends that take explicit dimensions instead of a ratio tag.
    /// Both sides are multiples of 16.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            AspectRatio::Square => (1024, 1024),
            AspectRatio::Portrait3x4 => (768, 1024),
            AspectRatio::Portrait9x16 => (720, 1280),
            AspectRatio::Landscape4x3 => (1024, 768),
            AspectRatio::Landscape16x9 => (1280, 720),
        }
    }

    pub fn option(&self) -> &'static RatioOption {
        ASPECT_RATIOS
            .iter()
            .find(|option| option.value == *self)
            .unwrap_or(&ASPECT_RATIOS[0])
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == needle)
            .or_else(|| {
                needle
                    .eq_ignore_ascii_case("square")
                    .then_some(AspectRatio::Square)
            })
            .ok_or_else(|| format!("Unknown aspect ratio: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleOption {
    pub value: Style,
    pub label: &'static str,
    pub label_ar: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatioOption {
    pub value: AspectRatio,
    pub label: &'static str,
}

pub static STYLE_OPTIONS: [StyleOption; 9] = [
    StyleOption {
        value: Style::None,
        label: "No Style (Default)",
        label_ar: "بدون نمط (افتراضي)",
    },
    StyleOption {
        value: Style::Realistic,
        label: "Realistic / Photorealistic",
        label_ar: "واقعية",
    },
    StyleOption {
        value: Style::Cartoon,
        label: "Cartoon",
        label_ar: "كرتونية",
    },
    StyleOption {
        value: Style::Fantasy,
        label: "Fantasy",
        label_ar: "خيالية",
    },
    StyleOption {
        value: Style::Artistic,
        label: "Artistic",
        label_ar: "فنية",
    },
    StyleOption {
        value: Style::ThreeD,
        label: "3D Render",
        label_ar: "ثلاثي الأبعاد",
    },
    StyleOption {
        value: Style::Cinematic,
        label: "Cinematic",
        label_ar: "سينمائية",
    },
    StyleOption {
        value: Style::Anime,
        label: "Anime",
        label_ar: "أنيمي",
    },
    StyleOption {
        value: Style::OilPainting,
        label: "Oil Painting",
        label_ar: "رسم زيتي",
    },
];

pub static ASPECT_RATIOS: [RatioOption; 5] = [
    RatioOption {
        value: AspectRatio::Square,
        label: "Square (1:1)",
    },
    RatioOption {
        value: AspectRatio::Landscape16x9,
        label: "Landscape (16:9)",
    },
    RatioOption {
        value: AspectRatio::Portrait9x16,
        label: "Portrait (9:16)",
    },
    RatioOption {
        value: AspectRatio::Landscape4x3,
        label: "Classic Landscape (4:3)",
    },
    RatioOption {
        value: AspectRatio::Portrait3x4,
        label: "Classic Portrait (3:4)",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_catalog_is_exhaustive() {
        for style in Style::ALL {
            let entries = STYLE_OPTIONS.iter().filter(|o| o.value == style).count();
            assert_eq!(entries, 1, "style {:?} must have exactly one entry", style);
            assert_eq!(style.option().value, style);
        }
        assert_eq!(STYLE_OPTIONS.len(), Style::ALL.len());
    }

    #[test]
    fn test_ratio_catalog_is_exhaustive() {
        for ratio in AspectRatio::ALL {
            let entries = ASPECT_RATIOS.iter().filter(|o| o.value == ratio).count();
            assert_eq!(entries, 1, "ratio {:?} must have exactly one entry", ratio);
            assert_eq!(ratio.option().value, ratio);
        }
        assert_eq!(ASPECT_RATIOS.len(), AspectRatio::ALL.len());
    }

    #[test]
    fn test_parsing() {
        assert_eq!("3D Render".parse::<Style>(), Ok(Style::ThreeD));
        assert_eq!("oilpainting".parse::<Style>(), Ok(Style::OilPainting));
        assert!("watercolor".parse::<Style>().is_err());

        assert_eq!("16:9".parse::<AspectRatio>(), Ok(AspectRatio::Landscape16x9));
        assert_eq!("square".parse::<AspectRatio>(), Ok(AspectRatio::Square));
        assert!("2:1".parse::<AspectRatio>().is_err());
    }

    #[test]
    fn test_serde_uses_tags() {
        assert_eq!(serde_json::to_string(&Style::ThreeD).unwrap(), "\"3D Render\"");
        assert_eq!(
            serde_json::from_str::<AspectRatio>("\"9:16\"").unwrap(),
            AspectRatio::Portrait9x16
        );
    }

    #[test]
    fn test_dimensions_follow_ratio() {
        for ratio in AspectRatio::ALL {
            let (w, h) = ratio.dimensions();
            assert_eq!(w % 16, 0);
            assert_eq!(h % 16, 0);
            let (a, b) = ratio
                .as_str()
                .split_once(':')
                .map(|(a, b)| (a.parse::<u32>().unwrap(), b.parse::<u32>().unwrap()))
                .unwrap();
            assert_eq!(w * b, h * a);
        }
    }
}
