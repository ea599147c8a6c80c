/// Produces deterministic unique URIs for external buffers and images.
///
/// One generator instance per resource family; each tracks its own counter
/// and multiplicity so a lone buffer is named `basename.bin` while siblings
/// are numbered `basename_1.bin`, `basename_2.bin`, ...
pub(crate) struct UriGenerator {
    basename: String,
    multiple: bool,
    counter: u32,
}

impl UriGenerator {
    pub fn new(basename: &str, multiple: bool) -> Self {
        UriGenerator {
            basename: basename.to_string(),
            multiple,
            counter: 1,
        }
    }

    /// A URI for the next resource. A pre-set URI on the property wins
    /// verbatim over the generated name.
    pub fn create_uri(&mut self, preset: Option<&str>, extension: &str) -> String {
        if let Some(uri) = preset {
            return uri.to_string();
        }
        if !self.multiple {
            return format!("{}.{}", self.basename, extension);
        }
        let uri = format!("{}_{}.{}", self.basename, self.counter, extension);
        self.counter += 1;
        uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_resource_is_unnumbered() {
        let mut uris = UriGenerator::new("scene", false);
        assert_eq!(uris.create_uri(None, "bin"), "scene.bin");
    }

    #[test]
    fn siblings_are_numbered_from_one() {
        let mut uris = UriGenerator::new("scene", true);
        assert_eq!(uris.create_uri(None, "bin"), "scene_1.bin");
        assert_eq!(uris.create_uri(None, "bin"), "scene_2.bin");
    }

    #[test]
    fn preset_uri_wins_and_skips_the_counter() {
        let mut uris = UriGenerator::new("scene", true);
        assert_eq!(uris.create_uri(Some("data.bin"), "bin"), "data.bin");
        assert_eq!(uris.create_uri(None, "bin"), "scene_1.bin");
    }
}
