//! Category to stroke color lookup used by the renderer.

use crate::annotation::ObjectClass;
use egui::Color32;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A color stored as `#RRGGBB` in settings files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub Color32);

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let digits = value.strip_prefix('#').unwrap_or(&value);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("expected #RRGGBB, got '{}'", value));
        }
        let rgb = u32::from_str_radix(digits, 16).map_err(|e| format!("invalid color '{}': {}", value, e))?;
        let [_, r, g, b] = rgb.to_be_bytes();
        Ok(HexColor(Color32::from_rgb(r, g, b)))
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        let [r, g, b, _] = color.0.to_array();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassColor {
    pub class: ObjectClass,
    pub color: HexColor,
}

/// Injectable category → color mapping with a fallback for unknown classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PaletteFile", into = "PaletteFile")]
pub struct ClassPalette {
    colors: HashMap<ObjectClass, Color32>,
    fallback: Color32,
}

#[derive(Serialize, Deserialize)]
struct PaletteFile {
    fallback: HexColor,
    #[serde(default)]
    entries: Vec<ClassColor>,
}

impl From<PaletteFile> for ClassPalette {
    fn from(file: PaletteFile) -> Self {
        let mut palette = ClassPalette::new(file.fallback.0);
        for entry in file.entries {
            palette.insert(entry.class, entry.color.0);
        }
        palette
    }
}

impl From<ClassPalette> for PaletteFile {
    fn from(palette: ClassPalette) -> Self {
        let mut entries: Vec<ClassColor> = palette
            .colors
            .into_iter()
            .map(|(class, color)| ClassColor { class, color: HexColor(color) })
            .collect();
        entries.sort_by_key(|e| e.class.to_string());
        PaletteFile {
            fallback: HexColor(palette.fallback),
            entries,
        }
    }
}

/// Power-line tower classes produced by the detection backend.
const TOWER_CLASSES: [(&str, [u8; 3]); 5] = [
    ("Одноцепная башенного типа", [0x79, 0x84, 0xF1]),
    ("Двухцепная башенного типа", [0x61, 0xC6, 0xFF]),
    ("Свободно стоящая типа «рюмка»", [0xF1, 0x79, 0xC1]),
    ("Портальная на оттяжках", [0x79, 0xF1, 0x7E]),
    ("Другие классы", [0xFF, 0xDC, 0x61]),
];

impl Default for ClassPalette {
    fn default() -> Self {
        let mut palette = ClassPalette::new(Color32::BLACK);
        for (code, (name, [r, g, b])) in TOWER_CLASSES.iter().enumerate() {
            let color = Color32::from_rgb(*r, *g, *b);
            palette.insert(ObjectClass::from(*name), color);
            palette.insert(ObjectClass::Code(code as i64), color);
        }
        palette
    }
}

impl ClassPalette {
    pub fn new(fallback: Color32) -> Self {
        Self {
            colors: HashMap::new(),
            fallback,
        }
    }

    pub fn insert(&mut self, class: ObjectClass, color: Color32) {
        self.colors.insert(class, color);
    }

    pub fn color_for(&self, class: &ObjectClass) -> Color32 {
        self.colors.get(class).copied().unwrap_or(self.fallback)
    }
}
