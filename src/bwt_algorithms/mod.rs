//! The bwt_algorithms module reverses the Burrow-Wheeler Transform (BWT) for the bzview decoder.
//!
//! BZIP2 uses the BWT to prepare data for compression. This transform alters the data in such
//! a way that runs of similar bytes are more likely to occur. The encoder has to sort every rotation
//! of the block, which is expensive. Undoing it is cheap: a counting sort over the block's byte
//! frequencies gives the permutation back in linear time.
//!
pub mod bwt_decode;
