use crate::errors::DataProcessingError;
use crate::models::ProteinEvidence;
use rayon::iter::{
    FromParallelIterator,
    IntoParallelIterator,
    IntoParallelRefIterator,
    IntoParallelRefMutIterator,
    ParallelIterator,
};

/// Per-channel intensity sums, merged across threads with fold/reduce.
#[derive(Debug, Default, Clone, PartialEq)]
struct ChannelSums {
    sums: Vec<f64>,
}

impl ChannelSums {
    fn fold(mut self, intensities: Vec<f64>) -> Self {
        if self.sums.len() < intensities.len() {
            self.sums.resize(intensities.len(), 0.0);
        }
        for (acc, x) in self.sums.iter_mut().zip(intensities) {
            *acc += x;
        }
        self
    }

    fn reduce(self, other: Self) -> Self {
        self.fold(other.sums)
    }
}

impl FromIterator<Vec<f64>> for ChannelSums {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Vec<f64>>,
    {
        iter.into_iter().fold(ChannelSums::default(), ChannelSums::fold)
    }
}

impl FromParallelIterator<Vec<f64>> for ChannelSums {
    fn from_par_iter<I>(par_iter: I) -> Self
    where
        I: IntoParallelIterator<Item = Vec<f64>>,
    {
        par_iter
            .into_par_iter()
            .fold(ChannelSums::default, ChannelSums::fold)
            .reduce(ChannelSums::default, ChannelSums::reduce)
    }
}

/// Rescales every protein's URazor channels against the dominant channel.
///
/// With `sum_c` the URazor total of channel `c` over all proteins, each
/// channel is multiplied by `sum_c / max(sum)`. Returns the applied factors.
///
/// # Errors
/// Returns [`DataProcessingError::UndefinedNormalization`] when the largest
/// channel sum is zero, including when there are no proteins. Proteins are
/// not modified in that case.
pub fn normalize_to_total_proteins(
    proteins: &mut [ProteinEvidence],
) -> Result<Vec<f64>, DataProcessingError> {
    let totals: ChannelSums = proteins
        .par_iter()
        .map(|p| p.urazor_labels.intensities())
        .collect();

    let max = totals.sums.iter().copied().fold(0.0, f64::max);
    if max <= 0.0 {
        return Err(DataProcessingError::UndefinedNormalization {
            num_proteins: proteins.len(),
            context: "URazor channel sums are all zero".into(),
        });
    }

    let factors: Vec<f64> = totals.sums.iter().map(|s| s / max).collect();
    proteins.par_iter_mut().for_each(|p| {
        for (channel, factor) in p.urazor_labels.channels.iter_mut().zip(factors.iter()) {
            channel.intensity *= factor;
        }
    });
    Ok(factors)
}
