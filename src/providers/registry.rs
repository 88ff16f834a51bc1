use std::path::Path;

use log::trace;

use super::{Bz2Provider, CompressionProvider, XzProvider};
use crate::compression::decompress::DecodeOptions;

/// Registry for managing compression providers.
/// Maps file extensions to the appropriate provider, longest extension first.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Box<dyn CompressionProvider>>,
    /// (lowercase extension, index into providers), kept sorted longest first
    extensions: Vec<(String, usize)>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the XZ and bzip2 providers.
    pub fn with_defaults(opts: DecodeOptions) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(XzProvider));
        registry.register(Box::new(Bz2Provider::new(opts)));
        registry
    }

    /// Register a provider. An extension that is already registered moves to the new provider.
    pub fn register(&mut self, provider: Box<dyn CompressionProvider>) {
        let idx = self.providers.len();
        for ext in provider.format().extensions {
            let ext = ext.to_lowercase();
            match self.extensions.iter_mut().find(|(e, _)| *e == ext) {
                Some(entry) => entry.1 = idx,
                None => self.extensions.push((ext, idx)),
            }
        }
        // Stable sort, so equal lengths keep registration order
        self.extensions.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        self.providers.push(provider);
    }

    /// Get the provider for a path, by the longest extension it ends with.
    pub fn get_provider(&self, path: &Path) -> Option<&dyn CompressionProvider> {
        let lower = path.to_string_lossy().to_lowercase();
        self.extensions
            .iter()
            .find(|(ext, _)| lower.ends_with(ext.as_str()))
            .map(|(ext, idx)| {
                trace!("{} matched extension {}", lower, ext);
                self.providers[*idx].as_ref()
            })
    }

    /// Check if any provider supports the path.
    pub fn supports_file(&self, path: &Path) -> bool {
        self.get_provider(path).is_some()
    }

    /// All registered providers, in registration order.
    pub fn providers(&self) -> impl Iterator<Item = &dyn CompressionProvider> {
        self.providers.iter().map(|p| p.as_ref())
    }

    /// All supported extensions, longest first.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.extensions.iter().map(|(ext, _)| ext.as_str()).collect()
    }

    /// The view schemes of all registered providers.
    pub fn schemes(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.format().scheme).collect()
    }
}
