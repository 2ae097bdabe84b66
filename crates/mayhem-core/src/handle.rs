use slotmap::new_key_type;

new_key_type! {
    /// Generation-checked handle to a [`Player`](crate::entity::Player).
    pub struct PlayerHandle;

    /// Generation-checked handle to a [`Platform`](crate::entity::Platform).
    pub struct PlatformHandle;

    /// Generation-checked handle to a [`Decoration`](crate::entity::Decoration).
    pub struct DecorationHandle;
}
