//! Random image pick for reminders.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub struct Gallery {
    images: Vec<String>,
    rng: StdRng,
}

impl Gallery {
    pub fn new(images: Vec<String>) -> Self {
        Self {
            images,
            rng: StdRng::from_entropy(),
        }
    }

    #[cfg(test)]
    pub fn with_seed(images: Vec<String>, seed: u64) -> Self {
        Self {
            images,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `None` when the gallery is empty.
    pub fn pick(&mut self) -> Option<&str> {
        self.images.choose(&mut self.rng).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_stays_in_gallery() {
        let images: Vec<String> = ["02.png", "39.png", "32.png", "08.png"]
            .into_iter()
            .map(String::from)
            .collect();
        let mut gallery = Gallery::with_seed(images.clone(), 7);

        for _ in 0..50 {
            let picked = gallery.pick().unwrap().to_string();
            assert!(images.contains(&picked));
        }
    }

    #[test]
    fn test_empty_gallery() {
        let mut gallery = Gallery::new(Vec::new());
        assert!(gallery.pick().is_none());
    }
}
