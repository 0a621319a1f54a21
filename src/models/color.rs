/// The storefront's named color palette. Labels are what customers and staff
/// use in requests; hex values drive the catalog rendering.
pub struct Color {
    pub label: &'static str,
    pub color: &'static str,
    pub text_color: &'static str,
}

pub const COLORS: &[Color] = &[
    Color { label: "Rojo", color: "#a42222", text_color: "#ffffff" },
    Color { label: "Azul", color: "#0cadde", text_color: "#070707" },
    Color { label: "Verde", color: "#1b8c1b", text_color: "#ffffff" },
    Color { label: "Amarillo", color: "#e0e010", text_color: "#070707" },
    Color { label: "Morado", color: "#b622b6", text_color: "#ffffff" },
    Color { label: "Blanco", color: "#ffffff", text_color: "#000000" },
    Color { label: "Cafe", color: "#52302a", text_color: "#ffffff" },
    Color { label: "Naranja", color: "#e07c10", text_color: "#070707" },
    Color { label: "Rosado", color: "#d272d5", text_color: "#ffffff" },
    Color { label: "Negro", color: "#070707", text_color: "#fafafa" },
    Color { label: "Otro", color: "#a6a6a6", text_color: "#232323" },
    Color { label: "Personalizado", color: "#000000", text_color: "#ffffff" },
];

/// Looks up the hex and text color for a label, falling back to black/white
/// for unknown labels.
pub fn color_from_label(label: &str) -> (&'static str, &'static str) {
    for c in COLORS {
        if c.label == label {
            return (c.color, c.text_color);
        }
    }
    ("#000000", "#ffffff")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_label_resolves() {
        assert_eq!(color_from_label("Rojo"), ("#a42222", "#ffffff"));
        assert_eq!(color_from_label("Azul"), ("#0cadde", "#070707"));
    }

    #[test]
    fn unknown_label_falls_back() {
        assert_eq!(color_from_label("Fucsia"), ("#000000", "#ffffff"));
    }
}
