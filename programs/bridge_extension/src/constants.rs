/// Creation code of the JumpPoint. Its hash, together with the constructor
/// arguments, fixes the address a JumpPoint is deployed at on every network.
pub const JUMP_POINT_CREATION_CODE: &[u8] = b"agglayer.bridge-and-call.JumpPoint.v1";
