use serde::Serialize;

/// Free-form plugin or execution configuration, kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Configuration {
    settings: Vec<Setting>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Setting {
    name: String,
    value: SettingValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Text(String),
    Nested(Configuration),
}

impl Configuration {
    /// Appends a text setting. Repeated names are kept, as Maven list
    /// parameters repeat their element.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.settings.push(Setting {
            name: name.into(),
            value: SettingValue::Text(value.into()),
        });
        self
    }

    /// Customizes the nested setting called `name`, creating it if needed.
    pub fn configure<F>(&mut self, name: impl Into<String>, customizer: F) -> &mut Self
    where
        F: FnOnce(&mut Configuration),
    {
        let name = name.into();
        let existing = self.settings.iter_mut().find_map(|s| match &mut s.value {
            SettingValue::Nested(nested) if s.name == name => Some(nested),
            _ => None,
        });
        match existing {
            Some(nested) => customizer(nested),
            None => {
                let mut nested = Configuration::default();
                customizer(&mut nested);
                self.settings.push(Setting {
                    name,
                    value: SettingValue::Nested(nested),
                });
            }
        }
        self
    }

    /// Appends a new nested setting even when one called `name` exists, for
    /// repeated blocks such as several `path` entries.
    pub fn add_nested<F>(&mut self, name: impl Into<String>, customizer: F) -> &mut Self
    where
        F: FnOnce(&mut Configuration),
    {
        let mut nested = Configuration::default();
        customizer(&mut nested);
        self.settings.push(Setting {
            name: name.into(),
            value: SettingValue::Nested(nested),
        });
        self
    }

    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    /// First setting called `name`.
    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.settings
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.value)
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

impl Setting {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &SettingValue {
        &self.value
    }
}

impl SettingValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&Configuration> {
        match self {
            Self::Nested(nested) => Some(nested),
            Self::Text(_) => None,
        }
    }
}
