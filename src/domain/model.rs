/// Model tier for the tiered (flash/pro) generator. Each tier fixes the
/// upstream model identifier and the reply character budget stated in the
/// prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Pro,
    Flash,
}

impl ModelTier {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pro" => Some(ModelTier::Pro),
            "flash" => Some(ModelTier::Flash),
            _ => None,
        }
    }

    pub fn model_id(&self) -> &'static str {
        match self {
            ModelTier::Pro => "gemini-1.5-pro-latest",
            ModelTier::Flash => "gemini-1.5-flash-latest",
        }
    }

    /// Pro can carry longer replies than flash.
    pub fn char_budget(&self) -> usize {
        match self {
            ModelTier::Pro => 500,
            ModelTier::Flash => 250,
        }
    }

    /// Next cheaper tier to fall back on when this one is unavailable.
    /// Flash is the floor and never downgrades further.
    pub fn downgrade(&self) -> Option<ModelTier> {
        match self {
            ModelTier::Pro => Some(ModelTier::Flash),
            ModelTier::Flash => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_model_tier() {
        assert_eq!(ModelTier::from_str("pro"), Some(ModelTier::Pro));
        assert_eq!(ModelTier::from_str("FLASH"), Some(ModelTier::Flash));
        assert_eq!(ModelTier::from_str(" pro "), Some(ModelTier::Pro));
        assert_eq!(ModelTier::from_str("turbo"), None);
    }

    #[test]
    fn tier_table_is_fixed() {
        assert_eq!(ModelTier::Pro.model_id(), "gemini-1.5-pro-latest");
        assert_eq!(ModelTier::Pro.char_budget(), 500);
        assert_eq!(ModelTier::Flash.model_id(), "gemini-1.5-flash-latest");
        assert_eq!(ModelTier::Flash.char_budget(), 250);
    }

    #[test]
    fn downgrade_bottoms_out_at_flash() {
        assert_eq!(ModelTier::Pro.downgrade(), Some(ModelTier::Flash));
        assert_eq!(ModelTier::Flash.downgrade(), None);
    }
}
