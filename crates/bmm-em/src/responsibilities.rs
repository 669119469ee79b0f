//! Soft assignments of rows to components.

use serde::{Deserialize, Serialize};

/// `n x K` posterior probabilities, row-major. Each row sums to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawResponsibilities")]
pub struct Responsibilities {
    rows: usize,
    components: usize,
    data: Vec<f64>,
}

#[derive(Deserialize)]
struct RawResponsibilities {
    rows: usize,
    components: usize,
    data: Vec<f64>,
}

impl TryFrom<RawResponsibilities> for Responsibilities {
    type Error = String;

    fn try_from(raw: RawResponsibilities) -> Result<Self, Self::Error> {
        if raw.components == 0 {
            return Err("responsibilities need at least one component".to_string());
        }
        if Some(raw.data.len()) != raw.rows.checked_mul(raw.components) {
            return Err(format!(
                "{} responsibilities for {}x{}",
                raw.data.len(),
                raw.rows,
                raw.components
            ));
        }
        if let Some(i) = raw.data.iter().position(|p| !(0.0..=1.0).contains(p)) {
            return Err(format!("responsibility {} is {}, expected [0, 1]", i, raw.data[i]));
        }
        Ok(Self {
            rows: raw.rows,
            components: raw.components,
            data: raw.data,
        })
    }
}

impl Responsibilities {
    /// All-zero buffer for `rows x components`; filled by the first E-step.
    pub(crate) fn zeros(rows: usize, components: usize) -> Self {
        Self {
            rows,
            components,
            data: vec![0.0; rows * components],
        }
    }

    /// One-hot responsibilities from hard labels.
    pub(crate) fn from_labels(labels: &[usize], components: usize) -> Self {
        let mut out = Self::zeros(labels.len(), components);
        for (row, &k) in labels.iter().enumerate() {
            out.data[row * components + k] = 1.0;
        }
        out
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn components(&self) -> usize {
        self.components
    }

    /// Posterior of every component for `row`.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.components..(row + 1) * self.components]
    }

    pub fn get(&self, row: usize, k: usize) -> f64 {
        self.data[row * self.components + k]
    }

    /// Row-major backing slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Most probable component per row; ties go to the lower index.
    pub fn assignments(&self) -> Vec<usize> {
        self.data
            .chunks(self.components)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .fold((0, f64::NEG_INFINITY), |best, (k, &p)| if p > best.1 { (k, p) } else { best })
                    .0
            })
            .collect()
    }

    /// Total responsibility mass per component.
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.components];
        for row in self.data.chunks(self.components) {
            for (s, &p) in sums.iter_mut().zip(row) {
                *s += p;
            }
        }
        sums
    }
}
