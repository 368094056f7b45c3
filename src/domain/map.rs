use serde::{Deserialize, Serialize};

use crate::domain::DomainId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainMap<T> {
    pub gross_motor: T,
    pub fine_motor: T,
    pub self_help: T,
    pub receptive_language: T,
    pub expressive_language: T,
    pub cognitive: T,
    pub socio_emotional: T,
}

impl<T> DomainMap<T> {
    pub fn from_fn(mut f: impl FnMut(DomainId) -> T) -> Self {
        Self {
            gross_motor: f(DomainId::GrossMotor),
            fine_motor: f(DomainId::FineMotor),
            self_help: f(DomainId::SelfHelp),
            receptive_language: f(DomainId::ReceptiveLanguage),
            expressive_language: f(DomainId::ExpressiveLanguage),
            cognitive: f(DomainId::Cognitive),
            socio_emotional: f(DomainId::SocioEmotional),
        }
    }

    pub fn get(&self, id: DomainId) -> &T {
        match id {
            DomainId::GrossMotor => &self.gross_motor,
            DomainId::FineMotor => &self.fine_motor,
            DomainId::SelfHelp => &self.self_help,
            DomainId::ReceptiveLanguage => &self.receptive_language,
            DomainId::ExpressiveLanguage => &self.expressive_language,
            DomainId::Cognitive => &self.cognitive,
            DomainId::SocioEmotional => &self.socio_emotional,
        }
    }

    pub fn get_mut(&mut self, id: DomainId) -> &mut T {
        match id {
            DomainId::GrossMotor => &mut self.gross_motor,
            DomainId::FineMotor => &mut self.fine_motor,
            DomainId::SelfHelp => &mut self.self_help,
            DomainId::ReceptiveLanguage => &mut self.receptive_language,
            DomainId::ExpressiveLanguage => &mut self.expressive_language,
            DomainId::Cognitive => &mut self.cognitive,
            DomainId::SocioEmotional => &mut self.socio_emotional,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (DomainId, &T)> + '_ {
        DomainId::ALL.into_iter().map(move |id| (id, self.get(id)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(DomainId, &T) -> U) -> DomainMap<U> {
        DomainMap::from_fn(|id| f(id, self.get(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_domains_deserialize_to_default() {
        let parsed: DomainMap<u8> =
            serde_json::from_str(r#"{"grossMotor": 7, "cognitive": 12}"#).expect("parse");
        assert_eq!(parsed.gross_motor, 7);
        assert_eq!(parsed.cognitive, 12);
        assert_eq!(parsed.self_help, 0);
    }

    #[test]
    fn iter_follows_canonical_order() {
        let map = DomainMap::from_fn(|id| id.index());
        let order: Vec<usize> = map.iter().map(|(_, idx)| *idx).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn get_mut_targets_single_domain() {
        let mut map = DomainMap::<u8>::default();
        *map.get_mut(DomainId::ExpressiveLanguage) = 4;
        assert_eq!(map.expressive_language, 4);
        assert_eq!(map.iter().map(|(_, v)| u32::from(*v)).sum::<u32>(), 4);
    }
}
