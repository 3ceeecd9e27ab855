use rand::seq::SliceRandom;

use crate::errors::UtilError;

/// Sorteia `count` números distintos no intervalo fechado `[start, end]`,
/// nunca devolvendo valores presentes em `exclude`. Falha quando o intervalo,
/// descontadas as exclusões, não comporta a quantidade pedida.
pub fn gen_random_nums(
    start: i64,
    end: i64,
    count: usize,
    exclude: &[i64],
) -> Result<Vec<i64>, UtilError>
{
    let mut pool: Vec<i64> = (start..=end).filter(|n| !exclude.contains(n)).collect();

    if pool.len() < count
    {
        return Err(UtilError::InsufficientRange {
            needed: count,
            available: pool.len(),
        });
    }

    let mut rng = rand::thread_rng();
    pool.shuffle(&mut rng);
    pool.truncate(count);

    Ok(pool)
}
