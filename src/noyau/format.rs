// src/noyau/format.rs
//
// Formatage des nombres pour l'affichage
// --------------------------------------
// Contrat d'idempotence : le texte produit doit re-passer par le
// jetonniseur et redonner la même valeur (au epsilon flottant près).
// - valeur entière  => pas de point décimal ("3", pas "3.0")
// - valeur fractionnaire => Display de f64 (représentation la plus courte)
// - -0.0 est affiché "0"

/// Au-delà de 2^53, f64 ne représente plus tous les entiers :
/// on laisse alors le Display standard faire foi.
const ENTIER_MAX_SUR: f64 = 9_007_199_254_740_992.0;

pub fn format_nombre(x: f64) -> String {
    debug_assert!(x.is_finite(), "format_nombre sur non-fini");

    // -0.0 -> "0"
    if x == 0.0 {
        return "0".to_string();
    }

    if x.fract() == 0.0 && x.abs() <= ENTIER_MAX_SUR {
        return format!("{}", x as i64);
    }

    format!("{x}")
}
