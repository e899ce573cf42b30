use std::collections::HashMap;
use std::sync::OnceLock;

/// A province: slug for routing, name for display, capital for weather queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProvinceRecord {
    pub slug: &'static str,
    pub name: &'static str,
    pub capital: &'static str,
}

impl ProvinceRecord {
    const fn new(slug: &'static str, name: &'static str, capital: &'static str) -> Self {
        Self {
            slug,
            name,
            capital,
        }
    }

    /// Label shown above a lookup result, e.g. "Álava (capital: Vitoria-Gasteiz)".
    pub fn display_label(&self) -> String {
        format!("{} (capital: {})", self.name, self.capital)
    }
}

/// All provinces in the order they are listed to the user.
pub static PROVINCES: [ProvinceRecord; 50] = [
    ProvinceRecord::new("a-coruna", "A Coruña", "A Coruña"),
    ProvinceRecord::new("alava", "Álava", "Vitoria-Gasteiz"),
    ProvinceRecord::new("albacete", "Albacete", "Albacete"),
    ProvinceRecord::new("alicante", "Alicante", "Alicante"),
    ProvinceRecord::new("almeria", "Almería", "Almería"),
    ProvinceRecord::new("asturias", "Asturias", "Oviedo"),
    ProvinceRecord::new("avila", "Ávila", "Ávila"),
    ProvinceRecord::new("badajoz", "Badajoz", "Badajoz"),
    ProvinceRecord::new("barcelona", "Barcelona", "Barcelona"),
    ProvinceRecord::new("burgos", "Burgos", "Burgos"),
    ProvinceRecord::new("caceres", "Cáceres", "Cáceres"),
    ProvinceRecord::new("cadiz", "Cádiz", "Cádiz"),
    ProvinceRecord::new("cantabria", "Cantabria", "Santander"),
    ProvinceRecord::new("castellon", "Castellón", "Castellón de la Plana"),
    ProvinceRecord::new("ciudad-real", "Ciudad Real", "Ciudad Real"),
    ProvinceRecord::new("cordoba", "Córdoba", "Córdoba"),
    ProvinceRecord::new("cuenca", "Cuenca", "Cuenca"),
    ProvinceRecord::new("girona", "Girona", "Girona"),
    ProvinceRecord::new("granada", "Granada", "Granada"),
    ProvinceRecord::new("guadalajara", "Guadalajara", "Guadalajara"),
    ProvinceRecord::new("gipuzkoa", "Gipuzkoa", "San Sebastián"),
    ProvinceRecord::new("huelva", "Huelva", "Huelva"),
    ProvinceRecord::new("huesca", "Huesca", "Huesca"),
    ProvinceRecord::new("illes-balears", "Illes Balears", "Palma"),
    ProvinceRecord::new("jaen", "Jaén", "Jaén"),
    ProvinceRecord::new("la-rioja", "La Rioja", "Logroño"),
    ProvinceRecord::new("las-palmas", "Las Palmas", "Las Palmas de Gran Canaria"),
    ProvinceRecord::new("leon", "León", "León"),
    ProvinceRecord::new("lleida", "Lleida", "Lleida"),
    ProvinceRecord::new("lugo", "Lugo", "Lugo"),
    ProvinceRecord::new("madrid", "Madrid", "Madrid"),
    ProvinceRecord::new("malaga", "Málaga", "Málaga"),
    ProvinceRecord::new("murcia", "Murcia", "Murcia"),
    ProvinceRecord::new("navarra", "Navarra", "Pamplona"),
    ProvinceRecord::new("ourense", "Ourense", "Ourense"),
    ProvinceRecord::new("palencia", "Palencia", "Palencia"),
    ProvinceRecord::new("pontevedra", "Pontevedra", "Pontevedra"),
    ProvinceRecord::new("salamanca", "Salamanca", "Salamanca"),
    ProvinceRecord::new(
        "santa-cruz-de-tenerife",
        "Santa Cruz de Tenerife",
        "Santa Cruz de Tenerife",
    ),
    ProvinceRecord::new("segovia", "Segovia", "Segovia"),
    ProvinceRecord::new("sevilla", "Sevilla", "Sevilla"),
    ProvinceRecord::new("soria", "Soria", "Soria"),
    ProvinceRecord::new("tarragona", "Tarragona", "Tarragona"),
    ProvinceRecord::new("teruel", "Teruel", "Teruel"),
    ProvinceRecord::new("toledo", "Toledo", "Toledo"),
    ProvinceRecord::new("valencia", "Valencia", "Valencia"),
    ProvinceRecord::new("valladolid", "Valladolid", "Valladolid"),
    ProvinceRecord::new("bizkaia", "Bizkaia", "Bilbao"),
    ProvinceRecord::new("zamora", "Zamora", "Zamora"),
    ProvinceRecord::new("zaragoza", "Zaragoza", "Zaragoza"),
];

/// Read-only view over a province table with a slug index.
#[derive(Debug)]
pub struct ProvinceDirectory {
    records: &'static [ProvinceRecord],
    by_slug: HashMap<&'static str, usize>,
}

static SPAIN: OnceLock<ProvinceDirectory> = OnceLock::new();

impl ProvinceDirectory {
    /// Build a directory over `records`. Later duplicates of a slug are ignored.
    pub fn new(records: &'static [ProvinceRecord]) -> Self {
        let mut by_slug = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            by_slug.entry(record.slug).or_insert(index);
        }
        Self { records, by_slug }
    }

    /// The process-wide directory of Spanish provinces.
    pub fn spain() -> &'static ProvinceDirectory {
        SPAIN.get_or_init(|| ProvinceDirectory::new(&PROVINCES))
    }

    /// Exact slug match; `None` when the slug is unknown.
    pub fn find_by_slug(&self, slug: &str) -> Option<&'static ProvinceRecord> {
        let records = self.records;
        self.by_slug.get(slug).map(|&index| &records[index])
    }

    pub fn all(&self) -> &'static [ProvinceRecord] {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Map a persisted slug list to records, keeping its order and dropping
    /// slugs that no longer exist.
    pub fn resolve_slugs<S: AsRef<str>>(&self, slugs: &[S]) -> Vec<&'static ProvinceRecord> {
        slugs
            .iter()
            .filter_map(|slug| self.find_by_slug(slug.as_ref()))
            .collect()
    }
}

/// Look up a Spanish province by slug.
pub fn find_by_slug(slug: &str) -> Option<&'static ProvinceRecord> {
    ProvinceDirectory::spain().find_by_slug(slug)
}

/// All Spanish provinces in listing order.
pub fn all() -> &'static [ProvinceRecord] {
    ProvinceDirectory::spain().all()
}
