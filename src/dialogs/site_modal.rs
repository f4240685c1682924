use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::info;

use crate::{
    api::{
        models::{SavedSite, SiteDetail, SiteId, SiteTreeSpecies, SiteType, TreeType},
        ApiClient, SiteClient, TreeClient,
    },
    error::ApiError,
};

lazy_static! {
    // 45°30'15.25"N
    static ref DMS: Regex = Regex::new(r#"^\s*(\d+)°\s*(\d+)'\s*(\d+)(?:\.(\d+))?"\s*([NSEW])\s*$"#).unwrap();
}

/// Degrees-minutes-seconds coordinate as edited in the site form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DmsCoordinate {
    pub degrees: Option<u32>,
    pub minutes: Option<u32>,
    pub seconds: Option<u32>,
    /// Decimal digits of the seconds as typed, leading zeros included.
    pub fraction: Option<String>,
    pub cardinal: Option<char>,
}

impl DmsCoordinate {
    pub fn with_cardinal(cardinal: char) -> Self {
        Self { cardinal: Some(cardinal), ..Default::default() }
    }

    /// Parses `45°30'15.25"N`. Anything else yields an empty coordinate.
    pub fn parse(text: &str) -> Self {
        let caps = match DMS.captures(text) {
            Some(caps) => caps,
            None => return Self::default(),
        };
        let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse().ok());

        Self {
            degrees: number(1),
            minutes: number(2),
            seconds: number(3),
            fraction: Some(caps.get(4).map_or("0", |m| m.as_str()).to_string()),
            cardinal: caps.get(5).and_then(|m| m.as_str().chars().next()),
        }
    }
}

impl fmt::Display for DmsCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}°{}'{}.{}\"",
            self.degrees.unwrap_or(0),
            self.minutes.unwrap_or(0),
            self.seconds.unwrap_or(0),
            self.fraction.as_deref().unwrap_or("0"),
        )?;
        if let Some(c) = self.cardinal {
            write!(f, "{}", c)?;
        }

        Ok(())
    }
}

/// Values held by the site form.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteDto {
    pub site_name: Option<String>,
    pub site_type: Option<u64>,
    pub image_url: Option<String>,
    pub dms_latitude: DmsCoordinate,
    pub dms_longitude: DmsCoordinate,
    pub presentation: Option<String>,
    pub size: Option<f64>,
    pub species: Vec<SiteTreeSpecies>,
    pub research_partner: bool,
    pub visible_on_map: bool,
}

impl Default for SiteDto {
    fn default() -> Self {
        Self {
            site_name: None,
            site_type: None,
            image_url: None,
            dms_latitude: DmsCoordinate::with_cardinal('N'),
            dms_longitude: DmsCoordinate::with_cardinal('W'),
            presentation: None,
            size: None,
            species: vec![],
            research_partner: true,
            visible_on_map: true,
        }
    }
}

impl SiteDto {
    pub fn from_detail(detail: &SiteDetail, image_url: Option<String>) -> Self {
        Self {
            site_name: Some(detail.name.clone()),
            site_type: Some(detail.site_type.id),
            image_url,
            dms_latitude: detail.coordinate.dms_latitude.as_deref().map(DmsCoordinate::parse).unwrap_or_default(),
            dms_longitude: detail.coordinate.dms_longitude.as_deref().map(DmsCoordinate::parse).unwrap_or_default(),
            presentation: detail.description.clone(),
            size: detail.size.trim().parse().ok(),
            species: detail.site_tree_species.clone(),
            research_partner: detail.research_partnership,
            visible_on_map: detail.visible_map,
        }
    }

    pub fn to_saved(&self) -> SavedSite {
        SavedSite {
            name: self.site_name.clone().unwrap_or_default(),
            site_type: self.site_type,
            dms_latitude: self.dms_latitude.to_string(),
            dms_longitude: self.dms_longitude.to_string(),
            description: self.presentation.clone(),
            size: self.size,
            species: self.species.clone(),
            research_partnership: self.research_partner,
            visible_map: self.visible_on_map,
        }
    }
}

/// Create/edit form of a site.
pub struct SiteModal {
    sites: SiteClient,
    trees: TreeClient,
    site_id: Option<SiteId>,
    site: SiteDto,
    available_species: Vec<TreeType>,
    available_site_types: Vec<SiteType>,
}

impl SiteModal {
    pub fn new(api: &ApiClient) -> Self {
        Self {
            sites: api.site_client.clone(),
            trees: api.tree_client.clone(),
            site_id: None,
            site: SiteDto::default(),
            available_species: vec![],
            available_site_types: vec![],
        }
    }

    /// Loads the choice lists and, when editing, the current site values.
    pub async fn open(&mut self, site_id: Option<SiteId>) -> Result<(), ApiError> {
        self.site_id = site_id;
        self.site = SiteDto::default();

        let (species, types) = futures::join!(self.trees.species(), self.sites.types());
        self.available_species = species?;
        self.available_site_types = types?;

        if let Some(id) = site_id {
            let detail = self.sites.detail(id).await?;
            let image_url = detail.image.as_ref().map(|img| self.sites.asset_url(&img.asset));
            self.site = SiteDto::from_detail(&detail, image_url);
        }

        Ok(())
    }

    pub fn site_id(&self) -> Option<SiteId> {
        self.site_id
    }

    pub fn site(&self) -> &SiteDto {
        &self.site
    }

    pub fn site_mut(&mut self) -> &mut SiteDto {
        &mut self.site
    }

    pub fn available_species(&self) -> &[TreeType] {
        &self.available_species
    }

    pub fn available_site_types(&self) -> &[SiteType] {
        &self.available_site_types
    }

    /// Creates the site, or updates it when the modal was opened on one.
    pub async fn save(&mut self) -> Result<SiteDetail, ApiError> {
        let body = self.site.to_saved();
        let saved = match self.site_id {
            Some(id) => self.sites.update(id, &body).await?,
            None => self.sites.create(&body).await?,
        };
        info!(site_id = saved.id, name = %saved.name, "site saved");

        self.site_id = Some(saved.id);
        Ok(saved)
    }

    pub fn cancel(&mut self) {
        self.site_id = None;
        self.site = SiteDto::default();
    }
}
