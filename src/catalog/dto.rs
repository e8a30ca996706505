use serde::Deserialize;

/// Body for POST /api/peliculas. Optional fields default to empty string.
#[derive(Debug, Deserialize)]
pub struct NuevaPelicula {
    #[serde(default)]
    pub titulo: String,
    pub anio: Option<i32>,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub elenco: String,
    #[serde(default)]
    pub genero: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub codigo_hash: String,
}

impl NuevaPelicula {
    pub fn missing_required_field(&self) -> bool {
        self.titulo.trim().is_empty()
            || self.anio.is_none()
            || self.director.trim().is_empty()
            || self.genero.trim().is_empty()
            || self.descripcion.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_default_to_empty() {
        let p: NuevaPelicula = serde_json::from_str(
            r#"{"titulo":"Dune","anio":2021,"director":"Villeneuve","genero":"Sci-fi","descripcion":"Arrakis"}"#,
        )
        .unwrap();
        assert!(!p.missing_required_field());
        assert_eq!(p.elenco, "");
        assert_eq!(p.poster, "");
        assert_eq!(p.codigo_hash, "");
    }

    #[test]
    fn missing_year_or_title_is_rejected() {
        let sin_anio: NuevaPelicula =
            serde_json::from_str(r#"{"titulo":"Dune","director":"V","genero":"S","descripcion":"D"}"#)
                .unwrap();
        assert!(sin_anio.missing_required_field());

        let sin_titulo: NuevaPelicula =
            serde_json::from_str(r#"{"anio":2021,"director":"V","genero":"S","descripcion":"D"}"#)
                .unwrap();
        assert!(sin_titulo.missing_required_field());
    }
}
