use geoinput_core::{AddressCandidate, Coordinates};
use serde::{Deserialize, Serialize};

/// Body of both the autocomplete and the search endpoint (`format=json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<AddressCandidate>,
}

impl GeocodeResponse {
    /// Coordinates of every result that has them, paired with its address.
    pub fn coordinates(&self) -> impl Iterator<Item = (Coordinates, &AddressCandidate)> + '_ {
        self.results
            .iter()
            .filter_map(|r| r.coordinates().map(|c| (c, r)))
    }

    pub fn best_match(&self) -> Option<Coordinates> {
        self.coordinates().next().map(|(c, _)| c)
    }
}
