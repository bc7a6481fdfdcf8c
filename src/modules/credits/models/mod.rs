mod credit;

pub use credit::{
    CreateCreditRequest, Credit, CreditListItemResponse, CreditResponse, CreditStatus,
};
