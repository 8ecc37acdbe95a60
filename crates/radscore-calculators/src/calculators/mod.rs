pub mod aast;
pub mod adrenal;
pub mod adrenal_mri;
pub mod albi;
pub mod aspects;
pub mod avs;
pub mod child_pugh;
pub mod ipss;
pub mod mehran;
pub mod meld;
pub mod milan;
pub mod mre;
pub mod nirads;
pub mod orads;
pub mod pirads;
pub mod prostate;
pub mod radiation;
pub mod renal;
pub mod shim;
pub mod thypro;
pub mod tirads;
