use std::{
    collections::HashMap,
    fs::File,
    io::{self, Read},
    path::Path,
};

use once_cell::sync::Lazy;

use crate::error::InvalidInputError;
use crate::models::{City, Coordinate};

const BUILTIN_CITIES: [(&str, f64, f64); 15] = [
    ("Chennai", 13.0827, 80.2707),
    ("Mumbai", 19.0760, 72.8777),
    ("Delhi", 28.6139, 77.2090),
    ("Bangalore", 12.9716, 77.5946),
    ("Hyderabad", 17.3850, 78.4867),
    ("Kolkata", 22.5726, 88.3639),
    ("Pune", 18.5204, 73.8567),
    ("Ahmedabad", 23.0225, 72.5714),
    ("Coimbatore", 11.0168, 76.9558),
    ("Madurai", 9.9252, 78.1198),
    ("Jaipur", 26.9124, 75.7873),
    ("Surat", 21.1702, 72.8311),
    ("Lucknow", 26.8467, 80.9462),
    ("Nagpur", 21.1458, 79.0882),
    ("Visakhapatnam", 17.6868, 83.2185),
];

static BUILTIN: Lazy<CityTable> = Lazy::new(|| CityTable {
    index: BUILTIN_CITIES
        .iter()
        .enumerate()
        .map(|(idx, (name, _, _))| (name.to_string(), idx))
        .collect(),
    cities: BUILTIN_CITIES
        .iter()
        .map(|&(name, lat, lon)| City {
            name: name.to_string(),
            coord: Coordinate { lat, lon },
        })
        .collect(),
});

#[derive(Debug, thiserror::Error)]
pub enum CityTableError {
    #[error("failed to read city table: {0}")]
    Io(#[from] io::Error),
    #[error("invalid city table definition: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] InvalidInputError),
}

/// Read-only lookup from city name to coordinate.
///
/// Iteration order is the insertion order of the source table, which keeps
/// listings and tie-breaking stable.
#[derive(Debug, Clone)]
pub struct CityTable {
    cities: Vec<City>,
    index: HashMap<String, usize>,
}

impl CityTable {
    /// The fifteen Indian hub cities shipped with the service.
    pub fn builtin() -> &'static CityTable {
        &BUILTIN
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CityTableError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, CityTableError> {
        let cities: Vec<City> = serde_json::from_reader(reader)?;
        Ok(Self::from_cities(cities)?)
    }

    /// Build a table, rejecting out-of-range coordinates and duplicate names.
    pub fn from_cities(cities: Vec<City>) -> Result<Self, InvalidInputError> {
        let mut index = HashMap::with_capacity(cities.len());
        for (idx, city) in cities.iter().enumerate() {
            if !city.coord.is_valid() {
                return Err(InvalidInputError::InvalidCoordinate {
                    name: city.name.clone(),
                    lat: city.coord.lat,
                    lon: city.coord.lon,
                });
            }
            if index.insert(city.name.clone(), idx).is_some() {
                return Err(InvalidInputError::DuplicateCity(city.name.clone()));
            }
        }
        Ok(Self { cities, index })
    }

    pub fn get(&self, name: &str) -> Option<Coordinate> {
        self.index.get(name).map(|&idx| self.cities[idx].coord)
    }

    pub fn coordinate(&self, name: &str) -> Result<Coordinate, InvalidInputError> {
        self.get(name)
            .ok_or_else(|| InvalidInputError::UnknownCity(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}
