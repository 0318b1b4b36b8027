use super::prelude::*;

pub fn rate_tip<R: TipRepo>(
    repo: &R,
    id: &str,
    user_id: &UserId,
    direction: RatingDirection,
) -> Result<Tip> {
    if !user_id.is_valid() {
        return Err(Error::UserId);
    }
    repo.rate_tip(id, user_id, direction, Timestamp::now())?;
    Ok(repo.get_tip(id)?)
}
