/// Provider identifier (e.g., "BrasilAPI", "ViaCEP")
pub type ProviderId = &'static str;
