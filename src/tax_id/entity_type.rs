use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// Legal form of a company, encoded by the leading letter of its tax id.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    SociedadAnonima,
    SociedadLimitada,
    SociedadColectiva,
    SociedadComanditaria,
    ComunidadDeBienes,
    Cooperativa,
    Asociacion,
    ComunidadDePropietarios,
    SociedadCivil,
    EntidadExtranjera,
    CorporacionLocal,
    OrganismoPublico,
    CongregacionReligiosa,
    OrganoAdministracionEstado,
    UnionTemporalEmpresas,
    Otros,
    EstablecimientoPermanente,
}

impl EntityType {
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::iter().find(|entity_type| entity_type.letter() == letter)
    }

    pub fn letter(&self) -> char {
        match self {
            EntityType::SociedadAnonima => 'A',
            EntityType::SociedadLimitada => 'B',
            EntityType::SociedadColectiva => 'C',
            EntityType::SociedadComanditaria => 'D',
            EntityType::ComunidadDeBienes => 'E',
            EntityType::Cooperativa => 'F',
            EntityType::Asociacion => 'G',
            EntityType::ComunidadDePropietarios => 'H',
            EntityType::SociedadCivil => 'J',
            EntityType::EntidadExtranjera => 'N',
            EntityType::CorporacionLocal => 'P',
            EntityType::OrganismoPublico => 'Q',
            EntityType::CongregacionReligiosa => 'R',
            EntityType::OrganoAdministracionEstado => 'S',
            EntityType::UnionTemporalEmpresas => 'U',
            EntityType::Otros => 'V',
            EntityType::EstablecimientoPermanente => 'W',
        }
    }

    /// Human readable name of the legal form
    pub fn label(&self) -> &'static str {
        match self {
            EntityType::SociedadAnonima => "Sociedad Anónima",
            EntityType::SociedadLimitada => "Sociedad Limitada",
            EntityType::SociedadColectiva => "Sociedad Colectiva",
            EntityType::SociedadComanditaria => "Sociedad Comanditaria",
            EntityType::ComunidadDeBienes => "Comunidad de Bienes",
            EntityType::Cooperativa => "Cooperativa",
            EntityType::Asociacion => "Asociación",
            EntityType::ComunidadDePropietarios => "Comunidad de Propietarios",
            EntityType::SociedadCivil => "Sociedad Civil",
            EntityType::EntidadExtranjera => "Entidad Extranjera",
            EntityType::CorporacionLocal => "Corporación Local",
            EntityType::OrganismoPublico => "Organismo Público",
            EntityType::CongregacionReligiosa => "Congregación Religiosa",
            EntityType::OrganoAdministracionEstado => "Órgano de la Administración del Estado",
            EntityType::UnionTemporalEmpresas => "Unión Temporal de Empresas",
            EntityType::Otros => "Otros",
            EntityType::EstablecimientoPermanente => "Establecimiento Permanente",
        }
    }

    /// Metric label value
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl Display for EntityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
