use super::prelude::*;

pub fn add_tip_comment<R: TipRepo>(repo: &R, id: &str, message_id: &MessageId) -> Result<Tip> {
    if !message_id.is_valid() {
        return Err(Error::EmptyComment);
    }
    repo.add_tip_comment(id, message_id, Timestamp::now())?;
    Ok(repo.get_tip(id)?)
}
