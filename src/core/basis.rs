//! Vorberechnete Lookup-Tabellen der Basisfunktionen.
//!
//! Beide Basisfamilien haben den Träger `[0, N]` mit `N = 2` und werden mit
//! `DISCRETIZATION_SAMPLING_RATE` Stützstellen pro Knotenintervall abgetastet.

/// Abtastrate pro Knotenintervall (R).
pub const DISCRETIZATION_SAMPLING_RATE: usize = 500;
/// Trägerbreite der Basisfunktionen (N).
pub const BASIS_SUPPORT: usize = 2;

/// Unveränderliche Lookup-Tabelle einer Basisfunktion über `[0, N)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BasisTable {
    samples: Vec<f64>,
}

impl BasisTable {
    /// Tastet `f` an `i / R` für `i < N·R` ab.
    pub fn sample(f: impl Fn(f64) -> f64) -> Self {
        let len = BASIS_SUPPORT * DISCRETIZATION_SAMPLING_RATE;
        let samples = (0..len)
            .map(|i| f(i as f64 / DISCRETIZATION_SAMPLING_RATE as f64))
            .collect();
        Self { samples }
    }

    /// Lineare B-Spline-Basis (Dreiecksfunktion).
    pub fn linear_b_spline() -> Self {
        Self::sample(linear_b_spline)
    }

    /// Hermite-Basis für Positionen, `H1(t − 1)`.
    pub fn hermite_position() -> Self {
        Self::sample(|t| hermite_h1(t - 1.0))
    }

    /// Hermite-Basis für Tangenten, `H2(t − 1)`.
    pub fn hermite_tangent() -> Self {
        Self::sample(|t| hermite_h2(t - 1.0))
    }

    /// Tabellenwert an einem Index; außerhalb des Trägers `None`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.samples.get(index).copied()
    }

    /// Anzahl Stützstellen (`N·R`).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `true`, wenn die Tabelle leer ist.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// `b(t) = t` auf `[0,1]`, `2 − t` auf `(1,2]`, sonst 0.
pub fn linear_b_spline(t: f64) -> f64 {
    if (0.0..=1.0).contains(&t) {
        t
    } else if t > 1.0 && t <= 2.0 {
        2.0 - t
    } else {
        0.0
    }
}

/// Hermite-Wertfunktion auf `[-1, 1]`.
pub fn hermite_h1(x: f64) -> f64 {
    if (0.0..=1.0).contains(&x) {
        (1.0 + 2.0 * x) * (x - 1.0) * (x - 1.0)
    } else if (-1.0..0.0).contains(&x) {
        (1.0 - 2.0 * x) * (x + 1.0) * (x + 1.0)
    } else {
        0.0
    }
}

/// Hermite-Ableitungsgewicht auf `[-1, 1]`.
pub fn hermite_h2(x: f64) -> f64 {
    if (0.0..=1.0).contains(&x) {
        x * (x - 1.0) * (x - 1.0)
    } else if (-1.0..0.0).contains(&x) {
        x * (x + 1.0) * (x + 1.0)
    } else {
        0.0
    }
}
